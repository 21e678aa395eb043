use common::messages::ChatMessage;
use common::view::outgoing_message;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ChatProps {
    pub messages: Vec<ChatMessage>,
    pub onsend: Callback<String>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(ChatPanel)]
pub fn chat_panel(props: &ChatProps) -> Html {
    let input = use_state(String::new);
    let oninput = {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            input.set(e.target_unchecked_into::<HtmlInputElement>().value())
        })
    };
    let send = {
        let input = input.clone();
        let onsend = props.onsend.clone();
        Callback::from(move |_: ()| {
            if let Some(message) = outgoing_message(&input) {
                onsend.emit(message);
                input.set(String::new());
            }
        })
    };
    let onkeypress = {
        let send = send.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                send.emit(());
            }
        })
    };
    let onclick = Callback::from(move |_| send.emit(()));
    html! {
        <div class={classes!("chat")}>
            <h3>{"Chat"}</h3>
            <div class={classes!("chat-log")}>
                {
                    props.messages.iter().enumerate().map(|(idx, msg)| html! {
                        <div key={idx.to_string()} class={classes!("chat-message")}>
                            <span class={classes!("chat-author")}>{format!("{}:", msg.player_name)}</span>
                            {" "}
                            <span>{msg.message.clone()}</span>
                        </div>
                    }).collect::<Html>()
                }
            </div>
            <div class={classes!("chat-input")}>
                <input
                    type="text"
                    value={(*input).clone()}
                    {oninput}
                    {onkeypress}
                    disabled={props.disabled}
                    placeholder="Type a message..." />
                <button {onclick} disabled={props.disabled}>{"Send"}</button>
            </div>
        </div>
    }
}
