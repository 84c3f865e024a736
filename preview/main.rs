use dioxus::prelude::*;
use dioxus_render_if_visible::{InnerStyle, RenderIfVisible};

#[derive(Clone, PartialEq)]
struct DemoCard {
    title: String,
    summary: String,
    extra_lines: usize,
}

fn build_cards() -> Vec<DemoCard> {
    (0..2000)
        .map(|i| DemoCard {
            title: format!("Card {}", i + 1),
            summary: format!("Rendered once it scrolls near the viewport. Index = {}", i),
            extra_lines: (i % 4) + 1,
        })
        .collect()
}

fn main() {
    dioxus::logger::init(dioxus::logger::tracing::Level::DEBUG).ok();
    dioxus::launch(App);
}

const PREVIEW_CSS: &str = r#"
    :root {
        --color-bg: #e8ebf3;
    }
    body {
        margin: 0;
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif;
        background: #f6f7fb;
        color: #1d2433;
    }
    .page {
        max-width: 980px;
        margin: 0 auto;
        padding: 24px 16px 48px;
    }
    .headline {
        margin: 0 0 8px;
        font-size: 28px;
        font-weight: 700;
        letter-spacing: -0.02em;
    }
    .sub {
        margin: 0 0 18px;
        color: #56607a;
        font-size: 14px;
    }
    .grid {
        display: grid;
        grid-template-columns: repeat(auto-fill, 300px);
        gap: 12px;
    }
    .card {
        box-sizing: border-box;
        width: 300px;
        height: 300px;
        overflow: hidden;
        background: #ffffff;
        border: 1px solid #dde3f0;
        border-radius: 12px;
        padding: 12px 14px;
        box-shadow: 0 2px 12px rgba(20, 34, 68, 0.06);
    }
    .card h3 {
        margin: 0 0 6px;
        font-size: 16px;
    }
    .card p {
        margin: 0;
        font-size: 14px;
        line-height: 1.45;
    }
"#;

#[allow(non_snake_case)]
fn App() -> Element {
    let cards = use_memo(build_cards);
    let cards_ref = cards.read();

    rsx! {
        style {
            "{PREVIEW_CSS}"
        }

        div { class: "page",
            h1 { class: "headline", "dioxus-render-if-visible Preview" }
            p { class: "sub", "2000 cards; each mounts only within 1000px of the viewport." }

            div { class: "grid",
                for (idx, card) in cards_ref.iter().enumerate() {
                    LazyCard { key: "{idx}", idx, card: card.clone() }
                }
            }
        }
    }
}

#[component]
fn LazyCard(idx: usize, card: DemoCard) -> Element {
    let extra_text = "Extra content for a taller body. ".repeat(card.extra_lines);
    let body = rsx! {
        article { class: "card",
            h3 { "#{idx + 1} - {card.title}" }
            p { "{card.summary}" }
            p { "{extra_text}" }
        }
    };

    if idx % 2 == 1 {
        rsx! {
            RenderIfVisible { inner_style: striped(), {body} }
        }
    } else {
        rsx! {
            RenderIfVisible { {body} }
        }
    }
}

fn striped() -> InnerStyle {
    InnerStyle::new()
        .with("height", "100%")
        .with("border-radius", "12px")
        .with("background", "repeating-linear-gradient(45deg, #eef1f7 0 10px, #e3e7f0 10px 20px)")
}
