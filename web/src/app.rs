use minigames_core::GameKind;
use yew::prelude::*;

use crate::clicker::ClickerView;
use crate::dodge::DodgeView;
use crate::guess::GuessView;
use crate::rps::RpsView;
use crate::stages::MusicToggle;

#[derive(Properties, Clone, PartialEq, Debug)]
pub(crate) struct AppProps {
    pub game: GameKind,
    #[prop_or_default]
    pub seed: Option<u64>,
}

/// Mounts one minigame; each game owns its own state and leaderboard.
#[function_component]
pub(crate) fn App(props: &AppProps) -> Html {
    let AppProps { game, seed } = props.clone();

    let view = match game {
        GameKind::Clicker => html! { <ClickerView/> },
        GameKind::Guess => html! { <GuessView {seed}/> },
        GameKind::Rocket | GameKind::CosmicDodge => html! { <DodgeView kind={game} {seed}/> },
        GameKind::RockPaperScissors => html! { <RpsView {seed}/> },
    };

    html! {
        <main class="minigames">
            <header>
                <h1>{ game.title() }</h1>
                <MusicToggle/>
            </header>
            { view }
        </main>
    }
}
