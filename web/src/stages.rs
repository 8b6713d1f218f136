use minigames_core::{GameKind, Leaderboard, LeaderboardRow, Nickname};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::audio;

#[derive(Properties, PartialEq)]
pub(crate) struct NicknameSetupProps {
    pub kind: GameKind,
    pub on_accept: Callback<Nickname>,
}

/// Nickname entry. Rejected input only shows a warning.
#[function_component]
pub(crate) fn NicknameSetup(props: &NicknameSetupProps) -> Html {
    let input = use_node_ref();
    let warning = use_state(|| None::<String>);

    let onsubmit = {
        let input = input.clone();
        let warning = warning.clone();
        let on_accept = props.on_accept.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let raw = input
                .cast::<HtmlInputElement>()
                .map(|el| el.value())
                .unwrap_or_default();
            match Nickname::parse(&raw) {
                Ok(nickname) => {
                    warning.set(None);
                    on_accept.emit(nickname);
                }
                Err(err) => {
                    log::debug!("nickname rejected: {}", err);
                    warning.set(Some(err.to_string()));
                }
            }
        })
    };

    html! {
        <section id="nickname-setup" class="panel">
            <h2>{ props.kind.title() }</h2>
            <form {onsubmit}>
                <input id="nickname-input" ref={input} type="text" placeholder="Your nickname" autocomplete="off"/>
                <button type="submit" id="start-game-btn">{"Let's go"}</button>
            </form>
            if let Some(text) = (*warning).clone() {
                <p class="warning" role="alert">{text}</p>
            }
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct InstructionsProps {
    pub nickname: AttrValue,
    pub on_ready: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

#[function_component]
pub(crate) fn Instructions(props: &InstructionsProps) -> Html {
    let onclick = props.on_ready.reform(|_: MouseEvent| ());
    html! {
        <section id="instructions" class="panel">
            <p>{"Pilot: "}<span id="current-player-name">{ props.nickname.clone() }</span></p>
            { props.children.clone() }
            <button id="start-round-btn" {onclick}>{"Start round"}</button>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct LeaderboardProps {
    pub kind: GameKind,
    pub board: Leaderboard,
}

fn row_view(row: &LeaderboardRow) -> Html {
    let medal = row.medal.map(|medal| {
        html! { <i class={classes!("fas", "fa-medal", medal.css_class())}/> }
    });
    html! {
        <li class={classes!(row.medal.map(|_| "podium"))}>
            <span class="rank">{ for medal }{ format!("{}. ", row.rank) }</span>
            <strong class="name">{ row.name.clone() }</strong>
            <span class="score">{ row.score_label.clone() }</span>
        </li>
    }
}

/// Names always go in as text nodes, never as markup.
#[function_component]
pub(crate) fn LeaderboardView(props: &LeaderboardProps) -> Html {
    let kind = props.kind;
    let rows = props.board.rows(|score| kind.format_score(score));

    html! {
        <ol id={format!("{}-leaderboard-list", kind.slug())} class="leaderboard">
            if rows.is_empty() {
                <li class="empty">{"No scores yet..."}</li>
            } else {
                { for rows.iter().map(row_view) }
            }
        </ol>
    }
}

#[function_component]
pub(crate) fn MusicToggle() -> Html {
    let playing = use_state(audio::is_playing);
    {
        let playing = playing.clone();
        use_effect_with((), move |_| {
            let listeners = audio::watch_playback(Callback::from(move |now| playing.set(now)));
            move || drop(listeners)
        });
    }
    let onclick = {
        let playing = playing.clone();
        Callback::from(move |_: MouseEvent| playing.set(audio::toggle_music()))
    };
    let icon = if *playing {
        "fa-volume-up"
    } else {
        "fa-volume-mute"
    };
    html! {
        <button id="musicToggle" class="music-toggle" {onclick}>
            <i id="musicIcon" class={classes!("fas", icon)}/>
        </button>
    }
}
