use maud::{Markup, html};

use crate::model::{HandicapHistory, Player};
use crate::view::index::render_index_template;

/// One decimal, as handicaps are published.
#[must_use]
pub fn format_index(value: f64) -> String {
    format!("{value:.1}")
}

#[must_use]
pub fn render_history_table(history: &HandicapHistory) -> Markup {
    html! {
        @if history.points.is_empty() {
            p class="no-rounds" { "No rounds recorded." }
        } @else {
            table class="handicap-history" {
                thead {
                    tr {
                        th { "Date" }
                        th { "Differential" }
                        th { "Rounds" }
                        th { "Handicap" }
                    }
                }
                tbody {
                    @for point in &history.points {
                        tr data-round-id=(point.round_id) {
                            td { (point.date.format("%Y-%m-%d")) }
                            td { (format!("{:.1}", point.score_differential)) }
                            td { (point.rounds_considered) }
                            td class="handicap" { (format_index(point.handicap_index)) }
                        }
                    }
                }
            }
        }
    }
}

#[must_use]
pub fn render_history_page(player: &Player, history: &HandicapHistory) -> Markup {
    let body = html! {
        p class="current-handicap" {
            "Current handicap index: "
            strong { (format_index(player.handicap_index)) }
        }
        h3 { "History" }
        (render_history_table(history))
    };
    render_index_template(&player.name, body)
}
