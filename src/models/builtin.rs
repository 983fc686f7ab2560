// Literal content table shown on the demos and learnings pages

use super::{CatalogEntry, MediaSource};

const ATTRIBUTION: &str = "PMs Shipping Code cohort";

fn demo(id: &str) -> CatalogEntry {
    CatalogEntry::new(id, MediaSource::Video(format!("videos/{id}-demo.mp4")))
        .with_attribution(ATTRIBUTION)
}

fn slides(id: &str, count: usize) -> CatalogEntry {
    let images = (1..=count)
        .map(|n| format!("images/{id}/slide-{n}.png"))
        .collect();
    CatalogEntry::new(id, MediaSource::Slides(images)).with_attribution(ATTRIBUTION)
}

pub(super) fn builtin_entries() -> Vec<CatalogEntry> {
    vec![
        demo("field-agent")
            .with_title("Field Agent")
            .with_status("Shipped")
            .with_description(
                "A mobile assistant that lets field teams log visits and pull account \
                 context without leaving the conversation.",
            )
            .with_badge("clock", "3 weeks")
            .with_badge("code", "TypeScript"),
        demo("governance")
            .with_title("Governance Dashboard")
            .with_status("Shipped")
            .with_description(
                "Policy checks and approval trails surfaced in one view for every release.",
            )
            .with_badge("clock", "2 weeks")
            .with_badge("shield", "Compliance"),
        demo("multiselect")
            .with_title("Multi-select Actions")
            .with_status("In review")
            .with_description("Bulk edit, tag and archive records from any list view.")
            .with_badge("clock", "4 days")
            .with_badge("layers", "UI"),
        demo("cursor-rules")
            .with_title("Cursor Rules")
            .with_status("Internal")
            .with_description(
                "Shared editor rules that keep generated code aligned with team conventions.",
            )
            .with_badge("clock", "1 week")
            .with_badge("book", "Docs"),
        slides("prompting", 5)
            .with_title("Prompting Is Product Work")
            .with_status("Learning")
            .with_description(
                "Writing a good prompt looks a lot like writing a good spec: scope, \
                 constraints, and examples.",
            )
            .with_badge("bulb", "Insight"),
        slides("code-review", 3)
            .with_title("Review Before You Merge")
            .with_status("Learning")
            .with_description("Small pull requests got reviewed; large ones got rubber-stamped.")
            .with_badge("git", "Process"),
        slides("shipping", 4)
            .with_title("Shipping Beats Polishing")
            .with_status("Learning")
            .with_description("The first deploy taught more than the previous two weeks of mocks.")
            .with_badge("rocket", "Delivery"),
    ]
}
