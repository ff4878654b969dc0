//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notedesk_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use notedesk_core::{
    ItemDraft, ItemStore, ItemType, MemoryItemStore, SearchQuery, StoreError,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("notedesk smoke failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), StoreError> {
    println!("notedesk_core version={}", notedesk_core::core_version());

    let mut store = MemoryItemStore::new();
    store.create(ItemDraft {
        created_at: Some(1_700_000_000_000),
        ..ItemDraft::task("Write the weekly report")
    })?;
    store.create(ItemDraft {
        is_pinned: Some(true),
        created_at: Some(1_700_000_100_000),
        ..ItemDraft::task("Ship the release")
    })?;
    store.create(ItemDraft {
        created_at: Some(1_700_000_200_000),
        ..ItemDraft::note("Meeting minutes", "## Agenda\n- scope the MVP")
    })?;

    for kind in [ItemType::Task, ItemType::Note] {
        println!("{}s:", kind.as_str());
        for item in store.list(kind)? {
            let pin = if item.is_pinned { "*" } else { " " };
            println!("  {pin} #{} {}", item.id, item.title);
        }
    }

    for hit in store.search(&SearchQuery::new("mvp"))? {
        println!("search hit: #{} {}", hit.item_id, hit.snippet);
    }

    Ok(())
}
