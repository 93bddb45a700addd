use crate::model::photo::{NamedPhoto, PhotoItem, ResolvedPhoto, SizeVariant};
use crate::sync_error::{SyncError, SyncResult};
use chrono::{Local, TimeZone};
use std::collections::HashMap;

static PHOTO_EXTENSION: &str = "jpg";
static TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Names every item after its like count, qualifying colliding names with the
/// capture time. Output order and length match `items`.
pub(crate) fn select(items: &[PhotoItem]) -> SyncResult<Vec<NamedPhoto>> {
    let resolved = items
        .iter()
        .map(resolve)
        .collect::<SyncResult<Vec<_>>>()?;

    let name_count = count_by(resolved.iter().map(|p| p.name.clone()));
    let stems: Vec<String> = resolved
        .iter()
        .map(|p| {
            if name_count[&p.name] > 1 {
                format!("{}_{}", p.name, timestamp_suffix(p.date))
            } else {
                p.name.clone()
            }
        })
        .collect();

    // same likes captured within the same second
    let stem_count = count_by(stems.iter().cloned());

    let named = resolved
        .into_iter()
        .zip(stems)
        .map(|(photo, stem)| {
            let file_name = if stem_count[&stem] > 1 {
                format!("{}_{}.{}", stem, photo.id, PHOTO_EXTENSION)
            } else {
                format!("{}.{}", stem, PHOTO_EXTENSION)
            };
            NamedPhoto { photo, file_name }
        })
        .collect();

    Ok(named)
}

/// Largest variant by area; the first one wins a tie.
pub(crate) fn best_size(sizes: &[SizeVariant]) -> Option<&SizeVariant> {
    let mut best: Option<&SizeVariant> = None;
    for size in sizes {
        if best.map_or(true, |b| size.area() > b.area()) {
            best = Some(size);
        }
    }
    best
}

/// Capture time in local time as `YYYYMMDD_HHMMSS`.
pub(crate) fn timestamp_suffix(date: i64) -> String {
    match Local.timestamp_opt(date, 0).single() {
        Some(time) => time.format(TIMESTAMP_FORMAT).to_string(),
        None => date.to_string(),
    }
}

fn resolve(item: &PhotoItem) -> SyncResult<ResolvedPhoto> {
    let size = best_size(&item.sizes).ok_or_else(|| {
        SyncError::InvalidInput(format!("photo {} has no size variants", item.id))
    })?;

    Ok(ResolvedPhoto {
        name: item.likes.count.to_string(),
        id: item.id,
        album_id: item.album_id,
        size: size.label(),
        url: size.url.clone(),
        date: item.date,
    })
}

fn count_by<I: Iterator<Item = String>>(names: I) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for name in names {
        *counts.entry(name).or_insert(0) += 1;
    }
    counts
}
