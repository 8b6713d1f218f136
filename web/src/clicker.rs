use gloo::timers::callback::Interval;
use minigames_core::{ClickerConfig, ClickerRound, GameKind, Nickname, TickOutcome};
use yew::prelude::*;

use crate::session::{Session, Stage};
use crate::stages::{Instructions, LeaderboardView, NicknameSetup};
use crate::utils::{LoopHandle, iso_date, utc_now};

const KIND: GameKind = GameKind::Clicker;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Accept(Nickname),
    StartRound,
    Click,
    Tick,
}

#[derive(Debug)]
pub(crate) struct ClickerView {
    session: Session,
    round: ClickerRound,
    timer: LoopHandle<Interval>,
}

impl ClickerView {
    fn start_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(1000, move || link.send_message(Msg::Tick))
    }

    fn start_round(&mut self, ctx: &Context<Self>) -> bool {
        if !self.session.begin_round() {
            return false;
        }
        self.round.start();
        self.timer.restart(|| Self::start_timer(ctx));
        true
    }

    fn finish_round(&mut self, score: u32) {
        self.timer.stop();
        self.session.record(score, Some(iso_date(utc_now())));
        self.session.end_round();
    }

    fn high_score(&self) -> u32 {
        self.session.board().best().map_or(0, |entry| entry.score())
    }
}

impl Component for ClickerView {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            session: Session::in_browser(KIND),
            round: ClickerRound::default(),
            timer: LoopHandle::default(),
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
            Click => match self.round.click() {
                Ok(score) => {
                    log::trace!("click {}", score);
                    true
                }
                Err(_) => false,
            },
            Tick => match self.round.tick() {
                Ok(TickOutcome::Running { .. }) => true,
                Ok(TickOutcome::TimeUp { score }) => {
                    self.finish_round(score);
                    true
                }
                Err(err) => {
                    log::debug!("stray tick: {}", err);
                    self.timer.stop();
                    false
                }
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let nickname = self
            .session
            .nickname()
            .map(|n| AttrValue::from(n.to_string()))
            .unwrap_or_default();

        let stage = match self.session.stage() {
            Stage::Setup => html! {
                <NicknameSetup kind={KIND} on_accept={link.callback(Msg::Accept)}/>
            },
            Stage::Instructions => html! {
                <Instructions {nickname} on_ready={link.callback(|_| Msg::StartRound)}>
                    <p>{ format!("Click the button as fast as you can for {} seconds.", ClickerConfig::DEFAULT.duration_secs) }</p>
                </Instructions>
            },
            Stage::Playing => html! {
                <section id="game-display" class="panel">
                    <p>{"Time: "}<span id="clicker-timer">{ self.round.time_left() }</span></p>
                    <p>{"Score: "}<span id="clicker-score">{ self.round.score() }</span></p>
                    <button id="main-click-btn" class="big" disabled={!self.timer.is_running()} onclick={link.callback(|_| Msg::Click)}>{"CLICK!"}</button>
                </section>
            },
            Stage::GameOver => html! {
                <section id="clicker-game-over" class="panel">
                    <p id="final-score-message">{ format!("You achieved {} clicks!", self.round.score()) }</p>
                    if let Some(rank) = self.session.last_rank() {
                        <p class="rank">{ format!("New entry at #{}", rank) }</p>
                    }
                    <button id="play-again-clicker-btn" onclick={link.callback(|_| Msg::StartRound)}>{"Play again"}</button>
                </section>
            },
        };

        html! {
            <div class="minigame clicker">
                { stage }
                <aside>
                    <p>{"High score: "}<span id="clicker-high-score">{ self.high_score() }</span></p>
                    <LeaderboardView kind={KIND} board={self.session.board().clone()}/>
                </aside>
            </div>
        }
    }
}
