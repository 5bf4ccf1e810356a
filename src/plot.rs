use anyhow::Result;
use attr_tally::{
    count_by_size, count_by_value, count_labels, count_matches, BarChart,
    MatchCount, MISSING,
};

use crate::{ChartArgs, IoPipe};

pub fn sizes(field: &str, args: ChartArgs, io: IoPipe) -> Result<()> {
    let entities = io.read_outline()?.entity_labels(field)?;
    let hist = count_by_size(&entities);
    log::debug!(
        "sizes: {} entities in {} buckets",
        hist.total(),
        hist.len()
    );

    let chart = BarChart::from_histogram("", &hist, |n| n.to_string());
    io.write_text(args.render(
        chart,
        "Number of attributes found per entity",
        &format!("# of {field} assigned to entity"),
    )?)
}

pub fn values(field: &str, args: ChartArgs, io: IoPipe) -> Result<()> {
    let entities = io.read_outline()?.entity_values(field)?;
    let hist = count_by_value(&entities);
    log::debug!(
        "values: {} entities in {} buckets",
        hist.total(),
        hist.len()
    );

    let chart = BarChart::from_histogram("", &hist, |v| {
        v.as_deref().unwrap_or(MISSING).to_owned()
    });
    io.write_text(args.render(
        chart,
        &format!("Number of entities per {field}"),
        field,
    )?)
}

pub fn labels(
    field: &str,
    top: Option<usize>,
    args: ChartArgs,
    io: IoPipe,
) -> Result<()> {
    let entities = io.read_outline()?.entity_labels(field)?;
    let hist = count_labels(&entities);
    log::debug!(
        "labels: {} labels over {} entities, {} distinct",
        hist.total(),
        entities.len(),
        hist.len()
    );

    let mut bars = hist.by_frequency();
    if let Some(top) = top {
        bars.truncate(top);
    }

    let chart = BarChart::new(
        "",
        bars.iter().map(|(k, _)| k.to_string()),
        bars.iter().map(|&(_, n)| n as i64),
    )?;
    io.write_text(args.render(
        chart,
        &format!("Frequency of {field} over all entities"),
        field,
    )?)
}

pub fn matches(
    field: &str,
    total: Option<usize>,
    args: ChartArgs,
    io: IoPipe,
) -> Result<()> {
    let entities = io.read_outline()?.entity_values(field)?;

    let m = match total {
        Some(total) => count_matches(&entities, total),
        None => MatchCount::from_input(&entities),
    };
    if m.matched < 0 {
        log::warn!(
            "matches: expected total {} is less than {} unmatched entities",
            m.total(),
            m.unmatched
        );
    }

    let chart = BarChart::from_matches("", &m);
    io.write_text(args.render(
        chart,
        &format!("Entities with and without {field}"),
        "Match status",
    )?)
}
