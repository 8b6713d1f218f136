use minigames_core::{Choice, GameKind, Nickname, RpsMatch, Throw, Verdict};
use rand::rngs::SmallRng;
use yew::prelude::*;

use crate::GameProps;
use crate::session::{Session, Stage};
use crate::stages::{Instructions, LeaderboardView, NicknameSetup};
use crate::utils::{iso_date, seeded_rng, utc_now};

const KIND: GameKind = GameKind::RockPaperScissors;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Accept(Nickname),
    StartRound,
    Choose(Choice),
    Reset,
}

const fn icon(choice: Choice) -> &'static str {
    match choice {
        Choice::Rock => "fa-hand-rock",
        Choice::Paper => "fa-hand-paper",
        Choice::Scissors => "fa-hand-scissors",
    }
}

const fn verdict_text(verdict: Verdict) -> (&'static str, &'static str) {
    match verdict {
        Verdict::Win => ("YOU WIN!", "winner"),
        Verdict::Lose => ("COMPUTER WINS!", "loser"),
        Verdict::Draw => ("DRAW!", "draw"),
    }
}

#[derive(Debug)]
pub(crate) struct RpsView {
    session: Session,
    game: RpsMatch,
    rng: SmallRng,
    last_throw: Option<Throw>,
    was_reset: bool,
}

impl RpsView {
    fn throw(&mut self, choice: Choice) -> bool {
        let throw = match self.game.play(choice, &mut self.rng) {
            Ok(throw) => throw,
            Err(err) => {
                log::debug!("throw ignored: {}", err);
                return false;
            }
        };
        // no terminal state, so every win is offered to the board
        if throw.verdict == Verdict::Win {
            self.session.record(throw.wins, Some(iso_date(utc_now())));
        }
        self.last_throw = Some(throw);
        self.was_reset = false;
        true
    }

    fn result_view(&self) -> Html {
        let Some(throw) = self.last_throw else {
            let text = if self.was_reset {
                "Score reset! Pick your weapon!"
            } else {
                "Pick your weapon!"
            };
            return html! { <div id="rps-round-result" class="message-box">{ text }</div> };
        };

        let (text, class) = verdict_text(throw.verdict);
        html! {
            <div id="rps-round-result" class={classes!("message-box", class)}>
                <div class="battle">
                    <i class={classes!("fas", icon(throw.player))}/>
                    {" vs "}
                    <i class={classes!("fas", icon(throw.computer))}/>
                </div>
                <strong>{ text }</strong>
            </div>
        }
    }
}

impl Component for RpsView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            session: Session::in_browser(KIND),
            game: RpsMatch::new(),
            rng: seeded_rng(ctx.props().seed),
            last_throw: None,
            was_reset: false,
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
            StartRound => {
                if self.session.begin_round() {
                    self.game.start();
                    true
                } else {
                    false
                }
            }
            Choose(choice) => self.throw(choice),
            Reset => {
                self.game.reset();
                self.last_throw = None;
                self.was_reset = true;
                true
            }
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
                    <p>{"Rock beats scissors, scissors beats paper, paper beats rock. Every win counts!"}</p>
                </Instructions>
            },
            // a match never ends on its own
            Stage::Playing | Stage::GameOver => html! {
                <section id="game-display" class="panel">
                    <p>
                        {"You: "}<span id="player-score">{ self.game.wins() }</span>
                        {" · Computer: "}<span id="computer-score">{ self.game.losses() }</span>
                    </p>
                    <div class="choices">
                        {
                            for Choice::ALL.into_iter().map(|choice| html! {
                                <button class="choice-btn" data-choice={choice.label()} onclick={link.callback(move |_| Msg::Choose(choice))}>
                                    <i class={classes!("fas", icon(choice))}/>
                                </button>
                            })
                        }
                    </div>
                    { self.result_view() }
                    <button id="rps-reset-btn" onclick={link.callback(|_| Msg::Reset)}>{"Reset score"}</button>
                </section>
            },
        };

        html! {
            <div class="minigame rps">
                { stage }
                <aside>
                    <LeaderboardView kind={KIND} board={self.session.board().clone()}/>
                </aside>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_choice_has_its_own_icon() {
        let icons: Vec<_> = Choice::ALL.into_iter().map(icon).collect();
        assert_eq!(icons, ["fa-hand-rock", "fa-hand-paper", "fa-hand-scissors"]);
    }

    #[test]
    fn verdict_classes() {
        assert_eq!(verdict_text(Verdict::Win).1, "winner");
        assert_eq!(verdict_text(Verdict::Lose).1, "loser");
    }
}
