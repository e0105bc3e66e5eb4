//! Board command - print the colour board or inspect one cell

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use huecue_core::{
    color_map, parse_coordinate, zone_members, Cell, Color, Coordinate, ScoringZones, Zone,
    COLUMN_COUNT, ROWS,
};

#[derive(Args)]
pub struct BoardArgs {
    /// Cell to inspect (e.g. K12); prints the whole board when omitted
    pub coordinate: Option<String>,

    /// Score a guessed cell against the inspected cell
    #[arg(long, value_name = "CELL", requires = "coordinate")]
    pub guess: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One cell with its scoring neighbourhood
#[derive(Serialize)]
struct CellReport {
    coordinate: Coordinate,
    color: Color,
    zones: ScoringZones,
    #[serde(skip_serializing_if = "Option::is_none")]
    guess: Option<GuessReport>,
}

/// Where a guess lands relative to the inspected cell
#[derive(Serialize)]
struct GuessReport {
    coordinate: Coordinate,
    zone: Zone,
    points: u32,
}

pub fn run(args: BoardArgs) -> Result<()> {
    match &args.coordinate {
        Some(text) => {
            let coordinate =
                parse_coordinate(text).with_context(|| format!("Invalid coordinate: {text}"))?;
            let guess = args
                .guess
                .as_deref()
                .map(|g| parse_coordinate(g).with_context(|| format!("Invalid guess: {g}")))
                .transpose()?;
            let report = inspect_cell(coordinate, guess);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", format_cell(&report));
            }
        }
        None => {
            let cells = color_map();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&cells)?);
            } else {
                println!("{}", format_board(&cells));
            }
        }
    }

    Ok(())
}

fn inspect_cell(coordinate: Coordinate, guess: Option<Coordinate>) -> CellReport {
    let zones = zone_members(coordinate);
    let guess = guess.map(|cell| {
        // Cells outside the 5x5 neighbourhood miss
        let zone = zones.zone_of(cell).unwrap_or(Zone::Miss);
        GuessReport {
            coordinate: cell,
            zone,
            points: zone.points(),
        }
    });

    CellReport {
        coordinate,
        color: coordinate.color(),
        zones,
        guess,
    }
}

fn format_cell(report: &CellReport) -> String {
    let list = |cells: &[Coordinate]| {
        cells
            .iter()
            .map(Coordinate::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut text = format!(
        "{} {}\n  inner: {}\n  outer: {}",
        report.coordinate,
        report.color,
        list(&report.zones.inner),
        list(&report.zones.outer)
    );
    if let Some(guess) = &report.guess {
        text.push_str(&format!(
            "\n  guess {}: {} (+{})",
            guess.coordinate,
            guess.zone.label(),
            guess.points
        ));
    }
    text
}

/// One line per row: the row letter then 24 hex colours
fn format_board(cells: &[Cell]) -> String {
    cells
        .chunks(usize::from(COLUMN_COUNT))
        .zip(ROWS)
        .map(|(row, letter)| {
            let colors: Vec<_> = row.iter().map(|cell| cell.color.to_string()).collect();
            format!("{letter} {}", colors.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
