use gloo::events::EventListener;
use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::utils::window;
use minigames_core::{
    Controls, Direction, DodgeConfig, DodgeRound, FrameOutcome, GameKind, Nickname, Rect,
};
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use crate::session::{Session, Stage};
use crate::stages::{Instructions, LeaderboardView, NicknameSetup};
use crate::utils::{LoopHandle, iso_date, seeded_rng, utc_now};

/// Assumed frame length for the first frame of a round.
const FIRST_FRAME_MS: f64 = 1000. / 60.;

pub(crate) const fn dodge_config(kind: GameKind) -> DodgeConfig {
    match kind {
        GameKind::Rocket => DodgeConfig::ROCKET,
        _ => DodgeConfig::COSMIC,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Accept(Nickname),
    StartRound,
    Frame(f64),
    Key(Direction, bool),
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct DodgeProps {
    pub kind: GameKind,
    #[prop_or_default]
    pub seed: Option<u64>,
}

pub(crate) struct DodgeView {
    kind: GameKind,
    session: Session,
    round: DodgeRound,
    rng: SmallRng,
    frame: LoopHandle<AnimationFrame>,
    last_frame_at: Option<f64>,
    _key_listeners: [EventListener; 2],
}

fn key_listener(ctx: &Context<DodgeView>, event_type: &'static str, pressed: bool) -> EventListener {
    let link = ctx.link().clone();
    EventListener::new(&window(), event_type, move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if let Some(direction) = Direction::from_key(&event.key()) {
            link.send_message(Msg::Key(direction, pressed));
        }
    })
}

fn rect_style(rect: &Rect) -> String {
    format!(
        "left:{:.1}px;top:{:.1}px;width:{}px;height:{}px",
        rect.x, rect.y, rect.width, rect.height
    )
}

impl DodgeView {
    fn request_frame(ctx: &Context<Self>) -> AnimationFrame {
        let link = ctx.link().clone();
        request_animation_frame(move |timestamp| link.send_message(Msg::Frame(timestamp)))
    }

    fn start_round(&mut self, ctx: &Context<Self>) -> bool {
        if !self.session.begin_round() {
            return false;
        }
        self.last_frame_at = None;
        self.round.start();
        self.frame.restart(|| Self::request_frame(ctx));
        true
    }

    fn on_frame(&mut self, ctx: &Context<Self>, timestamp: f64) -> bool {
        let elapsed = self
            .last_frame_at
            .map_or(FIRST_FRAME_MS, |last| timestamp - last);
        self.last_frame_at = Some(timestamp);

        match self.round.advance(elapsed, &mut self.rng) {
            Ok(FrameOutcome::Running { .. }) => {
                self.frame.restart(|| Self::request_frame(ctx));
                true
            }
            Ok(FrameOutcome::Crashed { score }) => {
                self.frame.stop();
                self.session.record(score, Some(iso_date(utc_now())));
                self.session.end_round();
                true
            }
            Err(err) => {
                log::debug!("stray frame: {}", err);
                self.frame.stop();
                false
            }
        }
    }

    fn on_key(&mut self, direction: Direction, pressed: bool) -> bool {
        match self.round.config().controls {
            Controls::Held => {
                self.round.set_held(direction, pressed);
                false
            }
            Controls::Press if pressed => self.round.nudge(direction).is_ok(),
            Controls::Press => false,
        }
    }

    fn arena_view(&self) -> Html {
        let config = self.round.config();
        let style = format!(
            "position:relative;overflow:hidden;width:{}px;height:{}px",
            config.arena_width, config.arena_height
        );
        html! {
            <div id="game-screen" class="arena" {style}>
                <div class="player" style={rect_style(self.round.player())}>{"🚀"}</div>
                {
                    for self.round.obstacles().iter().map(|obstacle| html! {
                        <div class="object" style={rect_style(&obstacle.rect)}/>
                    })
                }
            </div>
        }
    }

    fn final_message(&self) -> String {
        match self.kind {
            GameKind::Rocket => format!("Survival Time: {}s", self.round.score()),
            _ => format!("You scored an amazing {} points!", self.round.score()),
        }
    }
}

impl Component for DodgeView {
    type Message = Msg;
    type Properties = DodgeProps;

    fn create(ctx: &Context<Self>) -> Self {
        let DodgeProps { kind, seed } = ctx.props().clone();
        Self {
            kind,
            session: Session::in_browser(kind),
            round: DodgeRound::new(dodge_config(kind)),
            rng: seeded_rng(seed),
            frame: LoopHandle::default(),
            last_frame_at: None,
            _key_listeners: [
                key_listener(ctx, "keydown", true),
                key_listener(ctx, "keyup", false),
            ],
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Accept(nickname) => {
                self.session.accept(nickname);
                self.session.start_music();
                true
            }
            StartRound => self.start_round(ctx),
            Frame(timestamp) => self.on_frame(ctx, timestamp),
            Key(direction, pressed) => {
                log::trace!("key {:?} {}", direction, pressed);
                self.on_key(direction, pressed)
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let slug = self.kind.slug();
        let nickname = self
            .session
            .nickname()
            .map(|n| AttrValue::from(n.to_string()))
            .unwrap_or_default();

        let controls = match self.round.config().controls {
            Controls::Held => "Hold ← / → (or A / D) to steer. Survive as long as you can!",
            Controls::Press => "Tap ← / → (or A / D) to move. Every object you dodge is a point!",
        };

        let stage = match self.session.stage() {
            Stage::Setup => html! {
                <NicknameSetup kind={self.kind} on_accept={link.callback(Msg::Accept)}/>
            },
            Stage::Instructions => html! {
                <Instructions {nickname} on_ready={link.callback(|_| Msg::StartRound)}>
                    <p>{ controls }</p>
                </Instructions>
            },
            Stage::Playing => html! {
                <section id="game-display" class="panel">
                    <p>{"Score: "}<span id={format!("{}-score", slug)}>{ self.round.score() }</span></p>
                    { self.arena_view() }
                </section>
            },
            Stage::GameOver => html! {
                <section id={format!("{}-game-over", slug)} class="panel">
                    <p id="final-score-message">{ self.final_message() }</p>
                    if let Some(rank) = self.session.last_rank() {
                        <p class="rank">{ format!("New entry at #{}", rank) }</p>
                    }
                    <button id={format!("play-again-{}-btn", slug)} onclick={link.callback(|_| Msg::StartRound)}>{"Play again"}</button>
                </section>
            },
        };

        let high_score = self.session.board().best().map_or(0, |entry| entry.score());

        html! {
            <div class={classes!("minigame", slug)}>
                { stage }
                <aside>
                    <p>{"High score: "}<span id={format!("{}-high-score", slug)}>{ high_score }</span></p>
                    <LeaderboardView kind={self.kind} board={self.session.board().clone()}/>
                </aside>
            </div>
        }
    }
}
