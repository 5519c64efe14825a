//! Plain-text and JSON presentation of catalog views.
use std::io::{self, Write};

use catalog_core::{CreatureView, SpriteVariant, evolution_sprite_url};

/// Number shown in lists and cards, e.g. `#004`.
pub fn display_number(view: &CreatureView) -> String {
    format!("#{:03}", view.id().get())
}

/// One list row: number, localized name, types, colour and evolution line.
pub fn list_row(view: &CreatureView) -> String {
    let types = if view.types.is_empty() {
        "-".to_string()
    } else {
        view.types.join("/")
    };
    let evolutions = view
        .evolutions
        .iter()
        .map(|species| species.name.as_str())
        .collect::<Vec<_>>()
        .join(" > ");

    format!(
        "{:<5} {:<16} {:<16} {}  {}",
        display_number(view),
        view.name,
        types,
        view.color(),
        evolutions
    )
    .trim_end()
    .to_string()
}

/// Render the list view. Flavor text, when present, goes on an indented
/// line under its row.
pub fn write_list<'a, W, I>(out: &mut W, views: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a CreatureView>,
{
    let mut count = 0usize;
    for view in views {
        writeln!(out, "{}", list_row(view))?;
        if let Some(flavor) = &view.flavor_text {
            writeln!(out, "      {}", flavor)?;
        }
        count += 1;
    }
    if count == 0 {
        writeln!(out, "No creatures match.")?;
    }
    Ok(())
}

/// Render the list view as a JSON array.
pub fn write_json<'a, W, I>(out: &mut W, views: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a CreatureView>,
{
    let views: Vec<&CreatureView> = views.into_iter().collect();
    serde_json::to_writer_pretty(&mut *out, &views)?;
    writeln!(out)
}

/// Detail card for a single creature.
pub fn detail_card(view: &CreatureView, sprite: SpriteVariant) -> String {
    let mut lines = vec![
        format!("{} ({})", view.name, display_number(view)),
        format!(
            "Sprite ({}): {}",
            sprite,
            view.sprites.select(sprite).unwrap_or("-")
        ),
        format!(
            "Height: {:.1} m | Weight: {:.1} kg",
            view.height_m(),
            view.weight_kg()
        ),
        "Stats:".to_string(),
    ];
    lines.extend(
        view.stats
            .iter()
            .map(|stat| format!("  {:<18} {:>3}", stat.label, stat.base_value)),
    );

    if !view.evolutions.is_empty() {
        lines.push("Evolutions:".to_string());
        lines.extend(view.evolutions.iter().map(|species| {
            format!(
                "  {:<18} {}",
                species.name,
                evolution_sprite_url(species).as_deref().unwrap_or("-")
            )
        }));
    }

    lines.join("\n")
}
