use std::io::Cursor;
use tiny_http::Response;

use viewwear::Category;

use crate::render::render_page;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub fn handle_get(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    // The page degrades to a zero-count header if the store is unreadable;
    // the catalog API reports the failure properly when the grid loads.
    let garment_count = state.store.list().map(|g| g.len()).unwrap_or(0);

    let page = render_page(|tmpl| {
        tmpl.replace("{{CATEGORY_TABS}}", &build_category_tabs())
            .replace("{{GARMENT_COUNT}}", &garment_count.to_string())
    });

    crate::routes::html_response(page)
}

fn build_category_tabs() -> String {
    Category::ALL
        .iter()
        .map(|c| {
            format!(
                r#"<button class="tab" data-category="{id}">{icon} {label}<span class="dot hidden" id="dot-{id}"></span></button>"#,
                id = c.as_str(),
                icon = icon_for(*c),
                label = label_for(*c),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn label_for(category: Category) -> &'static str {
    match category {
        Category::Shirts => "Shirts",
        Category::Pants => "Pants",
        Category::Shoes => "Shoes",
        Category::Jackets => "Jackets",
    }
}

fn icon_for(category: Category) -> &'static str {
    match category {
        Category::Shirts => "👕",
        Category::Pants => "👖",
        Category::Shoes => "👞",
        Category::Jackets => "🧥",
    }
}
