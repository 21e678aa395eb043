use common::view::Counters;
use common::CureStatus;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CountersProps {
    pub counters: Counters,
}

fn containment_label(status: CureStatus) -> &'static str {
    match status {
        CureStatus::Cured => "✓",
        CureStatus::Eradicated => "★",
        CureStatus::NotCured => "✗",
    }
}

#[function_component(CountersPanel)]
pub fn counters_panel(props: &CountersProps) -> Html {
    let counters = &props.counters;
    html! {
        <div class={classes!("counters")}>
            <div class={classes!("counter", "outbreaks")}>
                <h3>{"Outbreak Counter"}</h3>
                <div>{counters.outbreak_label()}</div>
            </div>
            <div class={classes!("counter", "infestation-rate")}>
                <h3>{"Infestation Rate"}</h3>
                <div>{counters.infestation_rate}</div>
            </div>
            <div class={classes!("counter", "containment")}>
                <h3>{"Containment"}</h3>
                {
                    counters.containment.iter().map(|(sector, status)| {
                        let contained = if status.is_contained() { "contained" } else { "open" };
                        html! {
                            <div key={sector.as_str()} class={classes!(sector.as_str(), contained)}>
                                {format!("{}: {}", sector.sector_name(), containment_label(*status))}
                            </div>
                        }
                    }).collect::<Html>()
                }
            </div>
            <div class={classes!("counter", "markers")}>
                <h3>{"Infestation Markers"}</h3>
                {
                    counters.markers_remaining.iter().map(|(sector, left)| html! {
                        <div key={sector.as_str()} class={classes!(sector.as_str())}>
                            {format!("{}: {}", sector.sector_name(), left)}
                        </div>
                    }).collect::<Html>()
                }
            </div>
        </div>
    }
}
