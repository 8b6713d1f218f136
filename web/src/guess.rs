use minigames_core::{
    BestAttempts, GameKind, GuessConfig, GuessOutcome, GuessRound, KeyValueStore, Nickname,
};
use rand::rngs::SmallRng;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::GameProps;
use crate::session::{Session, Stage};
use crate::stages::{Instructions, LeaderboardView, NicknameSetup};
use crate::utils::{iso_date, seeded_rng, utc_now};

const KIND: GameKind = GameKind::Guess;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Accept(Nickname),
    StartRound,
    Submit,
}

#[derive(Clone, Debug, PartialEq)]
enum Feedback {
    Waiting,
    Hint(&'static str),
    Rejected(String),
}

/// Applies a finished round to the session and returns the best-attempts
/// record in effect. Only wins reach the leaderboard.
fn settle<S: KeyValueStore>(
    session: &mut Session<S>,
    outcome: GuessOutcome,
    date: impl FnOnce() -> String,
) -> Option<BestAttempts> {
    match outcome {
        GuessOutcome::Won { attempts } => {
            session.record(attempts, Some(date()));
            session.end_round();
            session.store_mut().record_best_attempts(attempts)
        }
        GuessOutcome::Lost { .. } => {
            session.end_round();
            session.store().best_attempts()
        }
        GuessOutcome::TooLow { .. } | GuessOutcome::TooHigh { .. } => {
            session.store().best_attempts()
        }
    }
}

#[derive(Debug)]
pub(crate) struct GuessView {
    session: Session,
    round: GuessRound,
    rng: SmallRng,
    best: Option<BestAttempts>,
    feedback: Feedback,
    input: NodeRef,
}

impl GuessView {
    fn start_round(&mut self) -> bool {
        if !self.session.begin_round() {
            return false;
        }
        self.round.start(&mut self.rng);
        self.feedback = Feedback::Waiting;
        self.clear_input();
        true
    }

    fn take_input(&self) -> String {
        self.input
            .cast::<HtmlInputElement>()
            .map(|el| el.value())
            .unwrap_or_default()
    }

    fn clear_input(&self) {
        if let Some(el) = self.input.cast::<HtmlInputElement>() {
            el.set_value("");
        }
    }

    fn submit(&mut self) -> bool {
        let raw = self.take_input();
        match self.round.guess(&raw) {
            Ok(GuessOutcome::TooLow { .. }) => self.feedback = Feedback::Hint("📉 Too Low!"),
            Ok(GuessOutcome::TooHigh { .. }) => self.feedback = Feedback::Hint("📈 Too High!"),
            Ok(outcome) => {
                self.best = settle(&mut self.session, outcome, || iso_date(utc_now()));
            }
            Err(err) => {
                log::debug!("guess rejected: {}", err);
                self.feedback = Feedback::Rejected(err.to_string());
                return true;
            }
        }
        self.clear_input();
        true
    }

    fn game_over_view(&self, ctx: &Context<Self>) -> Html {
        let secret = self.round.secret().unwrap_or_default();
        let (title, message) = if self.round.won() {
            (
                "🎉 Excellent Guess!",
                format!(
                    "The number was {}. You found it in {} attempts!",
                    secret,
                    self.round.attempts_used()
                ),
            )
        } else {
            (
                "😭 Mission Failed!",
                format!("You ran out of attempts! The number was {}.", secret),
            )
        };

        html! {
            <section id="guess-game-over" class={classes!("panel", self.round.won().then_some("win"))}>
                <h3 id="status-title">{ title }</h3>
                <p id="final-score-message">{ message }</p>
                <button id="guess-reset-btn" onclick={ctx.link().callback(|_| Msg::StartRound)}>{"Play again"}</button>
            </section>
        }
    }
}

impl Component for GuessView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let session = Session::in_browser(KIND);
        let best = session.store().best_attempts();
        Self {
            session,
            round: GuessRound::default(),
            rng: seeded_rng(ctx.props().seed),
            best,
            feedback: Feedback::Waiting,
            input: NodeRef::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Accept(nickname) => {
                self.session.accept(nickname);
                self.session.start_music();
                true
            }
            StartRound => self.start_round(),
            Submit => self.submit(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let GuessConfig { min, max, attempts } = *self.round.config();
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
                    <p>{ format!("Guess the secret number between {} and {}. You have {} attempts.", min, max, attempts) }</p>
                </Instructions>
            },
            Stage::Playing => {
                let onsubmit = link.callback(|e: SubmitEvent| {
                    e.prevent_default();
                    Msg::Submit
                });
                let (class, text) = match &self.feedback {
                    Feedback::Waiting => ("message-box", "Waiting for your guess...".to_string()),
                    Feedback::Hint(hint) => ("message-box", hint.to_string()),
                    Feedback::Rejected(reason) => ("message-box warning", reason.clone()),
                };
                html! {
                    <section id="game-display" class="panel">
                        <p>{"Attempts left: "}<span id="guess-attempts">{ self.round.attempts_left() }</span></p>
                        <form id="guess-form" {onsubmit}>
                            <input id="guess-input" ref={self.input.clone()} type="number" min={min.to_string()} max={max.to_string()} autocomplete="off"/>
                            <button type="submit">{"Guess"}</button>
                        </form>
                        <p id="guess-message" {class}>{ text }</p>
                    </section>
                }
            }
            Stage::GameOver => self.game_over_view(ctx),
        };

        let best = self
            .best
            .map_or_else(|| "-".to_string(), |best| KIND.format_score(best.0));

        html! {
            <div class="minigame guess">
                { stage }
                <aside>
                    <p>{"Best: "}<span id="guess-high-score">{ best }</span></p>
                    <LeaderboardView kind={KIND} board={self.session.board().clone()}/>
                </aside>
            </div>
        }
    }
}
