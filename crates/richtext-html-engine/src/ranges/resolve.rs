use std::collections::{BTreeMap, BTreeSet};

use crate::model::Block;

use super::index::TextIndex;
use super::types::{AnnotatedRange, Annotation, StyledSegment};

/// Validates a block's style and entity ranges against `index`.
///
/// Styles come first, then entities, each in registration order.
pub fn annotated_ranges<'a>(block: &'a Block, index: &TextIndex<'_>) -> Vec<AnnotatedRange<'a>> {
    let len = index.len();
    let styles = block
        .inline_style_ranges
        .iter()
        .map(|r| (r.offset, r.length, Annotation::Style(r.style.as_str())));
    let entities = block
        .entity_ranges
        .iter()
        .map(|r| (r.offset, r.length, Annotation::Entity(&r.key)));

    styles
        .chain(entities)
        .filter_map(|(offset, length, annotation)| {
            let range = checked_range(offset, length, len);
            if range.is_none() {
                log::trace!(
                    "dropping {annotation:?} range offset={offset} length={length} in block {:?} (text length {len})",
                    block.key
                );
            }
            range.map(|(start, end)| AnnotatedRange {
                start,
                end,
                annotation,
            })
        })
        .collect()
}

fn checked_range(offset: i64, length: i64, len: usize) -> Option<(usize, usize)> {
    if length <= 0 {
        return None;
    }
    let start = usize::try_from(offset).ok()?;
    let end = start.checked_add(usize::try_from(length).ok()?)?;
    (end <= len).then_some((start, end))
}

/// Splits `[0, len)` at every range boundary.
pub fn resolve_ranges<'a>(len: usize, ranges: &[AnnotatedRange<'a>]) -> Vec<StyledSegment<'a>> {
    let mut boundaries: Vec<usize> = Vec::with_capacity(ranges.len() * 2 + 2);
    boundaries.push(0);
    boundaries.push(len);
    for range in ranges {
        boundaries.push(range.start);
        boundaries.push(range.end);
    }
    boundaries.sort_unstable();
    boundaries.dedup();

    // Range indices ordered by start and by end; registration order breaks ties.
    let mut starts: Vec<usize> = (0..ranges.len()).collect();
    starts.sort_by_key(|&i| (ranges[i].start, i));
    let mut ends: Vec<usize> = (0..ranges.len()).collect();
    ends.sort_by_key(|&i| (ranges[i].end, i));

    let mut next_start = 0;
    let mut next_end = 0;
    let mut active_styles: BTreeMap<&'a str, usize> = BTreeMap::new();
    // (start, registration index) so the first element is the winning entity
    let mut active_entities: BTreeSet<(usize, usize)> = BTreeSet::new();

    let mut segments = Vec::with_capacity(boundaries.len().saturating_sub(1));
    for window in boundaries.windows(2) {
        let (a, b) = (window[0], window[1]);

        while next_end < ends.len() && ranges[ends[next_end]].end <= a {
            let i = ends[next_end];
            match ranges[i].annotation {
                Annotation::Style(style) => {
                    if let Some(count) = active_styles.get_mut(style) {
                        *count -= 1;
                        if *count == 0 {
                            active_styles.remove(style);
                        }
                    }
                }
                Annotation::Entity(_) => {
                    active_entities.remove(&(ranges[i].start, i));
                }
            }
            next_end += 1;
        }

        while next_start < starts.len() && ranges[starts[next_start]].start <= a {
            let i = starts[next_start];
            match ranges[i].annotation {
                Annotation::Style(style) => *active_styles.entry(style).or_insert(0) += 1,
                Annotation::Entity(_) => {
                    active_entities.insert((ranges[i].start, i));
                }
            }
            next_start += 1;
        }

        let entity = active_entities
            .first()
            .and_then(|&(_, i)| match ranges[i].annotation {
                Annotation::Entity(key) => Some(key),
                Annotation::Style(_) => None,
            });

        segments.push(StyledSegment {
            start: a,
            end: b,
            styles: active_styles.keys().copied().collect(),
            entity,
        });
    }
    segments
}

/// Validates and resolves a block's ranges in one step.
pub fn resolve_block<'a>(block: &'a Block, index: &TextIndex<'_>) -> Vec<StyledSegment<'a>> {
    let ranges = annotated_ranges(block, index);
    resolve_ranges(index.len(), &ranges)
}
