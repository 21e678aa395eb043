use common::messages::ValidMoves;
use common::view::{ActionForm, ActionKind, ParamField};
use common::{Card, Player, Sector};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::player_card::PlayerCard;

#[derive(Properties, PartialEq)]
pub struct ActionPanelProps {
    pub form: ActionForm,
    pub hand: Vec<Card>,
    pub teammates: Vec<Player>,
    #[prop_or_default]
    pub destinations: Option<ValidMoves>,
    #[prop_or_default]
    pub busy: bool,
    pub onselect: Callback<ActionKind>,
    pub onparam: Callback<(ParamField, String)>,
    pub ontogglecard: Callback<String>,
    pub onsubmit: Callback<()>,
    pub onendturn: Callback<()>,
}

#[function_component(ActionPanel)]
pub fn action_panel(props: &ActionPanelProps) -> Html {
    let form = &props.form;
    let onsubmit = {
        let onsubmit = props.onsubmit.clone();
        Callback::from(move |_| onsubmit.emit(()))
    };
    let onendturn = {
        let onendturn = props.onendturn.clone();
        Callback::from(move |_| onendturn.emit(()))
    };
    html! {
        <div class={classes!("actions")}>
            <h3>{"Your Actions"}</h3>
            <div class={classes!("action-kinds")}>
                {
                    ActionKind::ALL.into_iter().map(|kind| {
                        let onselect = props.onselect.clone();
                        let onclick = Callback::from(move |_| onselect.emit(kind));
                        let class = if form.kind() == Some(kind) {
                            classes!("action-kind", kind.wire_name(), "active")
                        } else {
                            classes!("action-kind", kind.wire_name())
                        };
                        html! {
                            <button key={kind.wire_name()} {class} {onclick} disabled={props.busy}>
                                {kind.label()}
                            </button>
                        }
                    }).collect::<Html>()
                }
            </div>
            if let Some(kind) = form.kind() {
                <div class={classes!("action-form")}>
                    <h4>{format!("Action: {}", kind.label())}</h4>
                    { form.fields().iter().map(|field| param_field(props, *field)).collect::<Html>() }
                    <button onclick={onsubmit} disabled={props.busy || !form.is_ready()}>
                        {"Execute Action"}
                    </button>
                </div>
            }
            <button class={classes!("end-turn")} onclick={onendturn} disabled={props.busy}>
                {"End Turn"}
            </button>
        </div>
    }
}

fn text_setter(props: &ActionPanelProps, field: ParamField) -> Callback<String> {
    let onparam = props.onparam.clone();
    Callback::from(move |value: String| onparam.emit((field, value)))
}

fn select_input(
    props: &ActionPanelProps,
    field: ParamField,
    options: Vec<(String, String)>,
) -> Html {
    let setter = text_setter(props, field);
    let onchange = Callback::from(move |e: Event| {
        setter.emit(e.target_unchecked_into::<HtmlSelectElement>().value())
    });
    let current = props.form.text(field).unwrap_or_default().to_string();
    html! {
        <label key={field.key()} class={classes!("param")}>
            {field.label()}
            <select {onchange}>
                <option value="" selected={current.is_empty()}>{"Choose..."}</option>
                {
                    options.into_iter().map(|(value, label)| html! {
                        <option selected={value == current} value={value.clone()}>{label}</option>
                    }).collect::<Html>()
                }
            </select>
        </label>
    }
}

fn param_field(props: &ActionPanelProps, field: ParamField) -> Html {
    match field {
        ParamField::Destination => {
            let setter = text_setter(props, field);
            let oninput = Callback::from(move |e: InputEvent| {
                setter.emit(e.target_unchecked_into::<HtmlInputElement>().value())
            });
            let suggestions = props
                .destinations
                .as_ref()
                .map(|moves| moves.cities.iter().map(|d| d.name.clone()).collect::<Vec<_>>())
                .unwrap_or_default();
            html! {
                <label key={field.key()} class={classes!("param")}>
                    {field.label()}
                    <input
                        type="text"
                        list="destinations"
                        value={props.form.text(field).unwrap_or_default().to_string()}
                        {oninput}
                        placeholder="Planet name" />
                    <datalist id="destinations">
                        { suggestions.into_iter().map(|name| html! { <option value={name} /> }).collect::<Html>() }
                    </datalist>
                </label>
            }
        }
        ParamField::Color => select_input(
            props,
            field,
            Sector::ALL
                .into_iter()
                .map(|s| (s.as_str().to_string(), format!("{} ({})", s.sector_name(), s)))
                .collect(),
        ),
        ParamField::Card => select_input(
            props,
            field,
            props
                .hand
                .iter()
                .map(|card| (card.id().to_string(), card.label()))
                .collect(),
        ),
        ParamField::TargetPlayer => select_input(
            props,
            field,
            props
                .teammates
                .iter()
                .map(|p| (p.id.clone(), format!("{} ({})", p.seat_label(), p.role.display_name())))
                .collect(),
        ),
        ParamField::Cards => {
            let selected = props.form.selected_cards();
            html! {
                <div key={field.key()} class={classes!("param", "hand")}>
                    {field.label()}
                    {
                        props.hand.iter().map(|card| html! {
                            <PlayerCard
                                key={card.id().to_string()}
                                card={card.clone()}
                                selected={selected.iter().any(|id| id == card.id())}
                                onclick={props.ontogglecard.clone()} />
                        }).collect::<Html>()
                    }
                </div>
            }
        }
    }
}
