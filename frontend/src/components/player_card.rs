use common::Card;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PlayerCardProps {
    pub card: Card,
    #[prop_or_default]
    pub selected: bool,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub show_details: bool,
    #[prop_or_default]
    pub onclick: Option<Callback<String>>,
}

fn card_class(card: &Card) -> &'static str {
    if card.is_spread() {
        return "spread";
    }
    match card.color() {
        Some(sector) => sector.as_str(),
        None => "unknown",
    }
}

#[function_component(PlayerCard)]
pub fn player_card(props: &PlayerCardProps) -> Html {
    let card = &props.card;
    let mut class = classes!("card", card_class(card));
    if props.selected {
        class.push("selected");
    }
    if props.disabled {
        class.push("disabled");
    }
    let content = html! {
        <>
            <span class={classes!("card-label")}>{card.label()}</span>
            {
                match (props.show_details, card.color()) {
                    (true, Some(sector)) if !card.is_spread() => html! {
                        <div class={classes!("card-sector")}>{format!("{} sector", sector)}</div>
                    },
                    _ => html! {},
                }
            }
            if props.selected {
                <div class={classes!("card-check")}>{"✓"}</div>
            }
        </>
    };
    match &props.onclick {
        Some(callback) => {
            let callback = callback.clone();
            let card_id = card.id().to_string();
            let onclick = Callback::from(move |_| callback.emit(card_id.clone()));
            html! {
                <button {class} {onclick} disabled={props.disabled}>{content}</button>
            }
        }
        None => html! { <div {class}>{content}</div> },
    }
}

#[derive(Properties, PartialEq)]
pub struct CardBackProps {
    pub count: usize,
}

// Other players' hands are shown face down
#[function_component(CardBack)]
pub fn card_back(props: &CardBackProps) -> Html {
    html! {
        <div class={classes!("card-backs")}>
            { (0..props.count).map(|_| html! { <div class={classes!("card-back")}></div> }).collect::<Html>() }
        </div>
    }
}
