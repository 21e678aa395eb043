use common::model::PLANETS;
use common::view::PlanetMarker;
use yew::prelude::*;

const INFESTATION_OFFSET: f32 = 1.6;
const PAWN_OFFSET: f32 = 1.2;

#[derive(Properties, PartialEq)]
pub struct GalaxyMapProps {
    pub markers: Vec<PlanetMarker>,
    #[prop_or_default]
    pub onselect: Option<Callback<String>>,
}

#[function_component(GalaxyMap)]
pub fn galaxy_map(props: &GalaxyMapProps) -> Html {
    let routes = PLANETS.iter().filter_map(|planet| {
        planet.route_neighbor().map(|neighbor| {
            html! {
                <line
                    key={format!("{}-{}", planet.name, neighbor.name)}
                    x1={planet.x.to_string()} y1={planet.y.to_string()}
                    x2={neighbor.x.to_string()} y2={neighbor.y.to_string()} />
            }
        })
    });
    html! {
        <div class={classes!("galaxy-map")}>
            <svg viewBox="0 0 100 70">
                <g class={classes!("routes")} stroke="#94A3B8" stroke-width="0.2" opacity="0.3" fill="none">
                    { routes.collect::<Html>() }
                </g>
                <g class={classes!("planets")}>
                    {
                        props.markers.iter()
                            .map(|marker| planet_marker(marker, props.onselect.clone()))
                            .collect::<Html>()
                    }
                </g>
            </svg>
        </div>
    }
}

fn planet_marker(marker: &PlanetMarker, onselect: Option<Callback<String>>) -> Html {
    let fill = marker.sector.map(|s| s.hex()).unwrap_or("#6B7280");
    let onclick = onselect.map(|callback| {
        let name = marker.name.clone();
        Callback::from(move |_: MouseEvent| callback.emit(name.clone()))
    });
    let (x, y) = (marker.x, marker.y);
    html! {
        <g key={marker.name.clone()} class={classes!("planet")} {onclick}>
            if marker.command_base {
                <rect
                    x={(x - 1.5).to_string()} y={(y - 1.5).to_string()}
                    width="3" height="3" fill="none" stroke="#F8FAFC" stroke-width="0.3" />
            }
            <circle cx={x.to_string()} cy={y.to_string()} r="1" fill={fill} />
            <text x={x.to_string()} y={(y + 2.8).to_string()} font-size="1.4" text-anchor="middle">
                {marker.name.clone()}
            </text>
            {
                marker.infestations.iter().enumerate().map(|(idx, (sector, count))| {
                    let cx = x + 1.4 + idx as f32 * INFESTATION_OFFSET;
                    html! {
                        <g>
                            <circle cx={cx.to_string()} cy={(y - 1.4).to_string()} r="0.7" fill={sector.hex()} />
                            <text x={cx.to_string()} y={(y - 1.1).to_string()} font-size="0.9" text-anchor="middle" fill="#FFFFFF">
                                {count.to_string()}
                            </text>
                        </g>
                    }
                }).collect::<Html>()
            }
            {
                marker.pawns.iter().enumerate().map(|(idx, pawn)| {
                    let cx = x - 1.4 - idx as f32 * PAWN_OFFSET;
                    let stroke = if pawn.is_current { "#22D3EE" } else { "#0F172A" };
                    html! {
                        <circle
                            key={pawn.player_id.clone()}
                            cx={cx.to_string()} cy={(y + 1.2).to_string()} r="0.6"
                            fill={pawn.color} stroke={stroke} stroke-width="0.2">
                            <title>{format!("Player {}", pawn.seat)}</title>
                        </circle>
                    }
                }).collect::<Html>()
            }
        </g>
    }
}
