use common::view::GameOverSummary;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct GameOverProps {
    pub summary: GameOverSummary,
    pub onclose: Callback<()>,
}

#[function_component(GameOverModal)]
pub fn game_over_modal(props: &GameOverProps) -> Html {
    let summary = &props.summary;
    let headline = summary.headline();
    let onclick = {
        let onclose = props.onclose.clone();
        Callback::from(move |_| onclose.emit(()))
    };
    let outcome = if summary.is_victory() { "victory" } else { "defeat" };
    html! {
        <div class={classes!("modal-backdrop")}>
            <div class={classes!("modal", "game-over", outcome)}>
                <div class={classes!("game-over-icon")}>{headline.icon}</div>
                <h2>{headline.title}</h2>
                <p>{headline.description}</p>
                <dl class={classes!("game-over-stats")}>
                    <dt>{"Turns Played"}</dt>
                    <dd>{summary.turn_number}</dd>
                    <dt>{"Outbreaks"}</dt>
                    <dd>{summary.outbreak_count}</dd>
                    <dt>{"Containments"}</dt>
                    <dd>{format!("{} / 4", summary.containments_achieved)}</dd>
                    <dt>{"Difficulty"}</dt>
                    <dd>{summary.difficulty.to_string()}</dd>
                </dl>
                <button {onclick}>{"Return to Lobby"}</button>
            </div>
        </div>
    }
}
