//! Merge per-filter catalogs and dump the result.
//!
//! ```text
//! cargo run --example merge_filters -- out_dir g.cat:g r.cat:r i.cat:i
//! ```
//!
//! Writes `merged.cat`, one `<tag>.reg` region file per filter and `matches.csv` (the
//! g/r match report), and prints the first rows of the merged catalog.
use std::fs::File;

use camino::Utf8PathBuf;
use flexi_logger::Logger;
use log::{error, info};

use catmatch::constants::DEG2ARC;
use catmatch::io::{read_catalog, write_catalog, write_region_file, RegionOptions};
use catmatch::matching::match_positions;
use catmatch::merge::{merge_all, MergeParams};
use catmatch::{add_diff_column, CatMatchError, SkyPositions};

fn run(out_dir: Utf8PathBuf, inputs: Vec<(Utf8PathBuf, String)>) -> Result<(), CatMatchError> {
    let catalogs = inputs
        .iter()
        .map(|(path, _)| read_catalog(path))
        .collect::<Result<Vec<_>, _>>()?;
    let tags: Vec<String> = inputs.iter().map(|(_, tag)| tag.clone()).collect();

    let params = MergeParams::builder()
        .threshold(1.0 / DEG2ARC)
        .tags(tags.clone())
        .build()?;

    if catalogs.len() >= 2 {
        let fields = params.position_fields.clone();
        let report = match_positions(
            &SkyPositions::from_catalog(&catalogs[0], &fields)?,
            &SkyPositions::from_catalog(&catalogs[1], &fields)?,
            params.threshold,
        );
        report.write_csv(File::create(out_dir.join("matches.csv"))?)?;
        info!("{} {}/{} pairs", report.len(), tags[0], tags[1]);
    }

    let Some(mut merged) = merge_all(catalogs, &params)?.into_stacked() else {
        return Ok(());
    };

    if tags.len() >= 2 {
        let colour = format!("{}_{}", tags[0], tags[1]);
        add_diff_column(
            &mut merged,
            &format!("MAG_AUTO_{}", tags[0]),
            &format!("MAG_AUTO_{}", tags[1]),
            Some(colour.as_str()),
        )?;
    }

    write_catalog(&merged, &out_dir.join("merged.cat"))?;
    for tag in &tags {
        write_region_file(
            &merged,
            &out_dir.join(format!("{tag}.reg")),
            &RegionOptions::default().subtag(tag.as_str()),
        )?;
    }

    println!("{}", merged.show(10));
    Ok(())
}

fn main() {
    let _logger = Logger::try_with_env_or_str("info")
        .and_then(|logger| logger.start())
        .ok();

    let mut args = std::env::args().skip(1);
    let Some(out_dir) = args.next().map(Utf8PathBuf::from) else {
        eprintln!("usage: merge_filters <out_dir> <catalog:tag>...");
        std::process::exit(2);
    };
    let inputs = args
        .map(|arg| match arg.rsplit_once(':') {
            Some((path, tag)) => (Utf8PathBuf::from(path), tag.to_string()),
            None => {
                let path = Utf8PathBuf::from(&arg);
                let tag = path.file_stem().unwrap_or(arg.as_str()).to_string();
                (path, tag)
            }
        })
        .collect();

    if let Err(e) = run(out_dir, inputs) {
        error!("{e}");
        std::process::exit(1);
    }
}
