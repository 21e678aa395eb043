use common::view::DiscardFlow;
use common::Card;
use yew::prelude::*;

use crate::components::player_card::PlayerCard;

#[derive(Properties, PartialEq)]
pub struct DiscardProps {
    pub flow: DiscardFlow,
    pub hand: Vec<Card>,
    pub ontoggle: Callback<String>,
    pub onconfirm: Callback<()>,
}

#[function_component(DiscardModal)]
pub fn discard_modal(props: &DiscardProps) -> Html {
    let flow = &props.flow;
    let onclick = {
        let onconfirm = props.onconfirm.clone();
        Callback::from(move |_| onconfirm.emit(()))
    };
    html! {
        <div class={classes!("modal-backdrop")}>
            <div class={classes!("modal", "discard")}>
                <h2>{"Hand Limit Exceeded"}</h2>
                <p>{format!("Select {} card(s) to discard.", flow.required())}</p>
                <div class={classes!("hand")}>
                    {
                        props.hand.iter().map(|card| {
                            let selected = flow.is_selected(card.id());
                            html! {
                                <PlayerCard
                                    key={card.id().to_string()}
                                    card={card.clone()}
                                    {selected}
                                    disabled={!selected && flow.remaining() == 0}
                                    show_details=true
                                    onclick={props.ontoggle.clone()} />
                            }
                        }).collect::<Html>()
                    }
                </div>
                <button {onclick} disabled={!flow.can_confirm()}>
                    {format!("Discard {} / {}", flow.selected().len(), flow.required())}
                </button>
            </div>
        </div>
    }
}
