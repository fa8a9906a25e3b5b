use std::io::{self, Write};

use stockview_core::{BarSeries, PanelOutcome};

use crate::chart;
use crate::cli::OutputFormat;
use crate::commands::CommandOutput;
use crate::error::CliError;
use crate::report::{IntervalRow, ViewReport};

pub fn render(output: &CommandOutput, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_output(&mut out, output, format, pretty)?;
    out.flush()?;
    Ok(())
}

fn write_output<W: Write>(
    out: &mut W,
    output: &CommandOutput,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match (output, format) {
        (CommandOutput::View(report), OutputFormat::Json) => write_json(out, report, pretty),
        (CommandOutput::Intervals(rows), OutputFormat::Json) => write_json(out, rows, pretty),
        (CommandOutput::View(report), OutputFormat::Chart) => {
            write_view(out, report, |out, series, title| {
                for line in chart::render_candles(
                    series,
                    title,
                    chart::DEFAULT_HEIGHT,
                    chart::DEFAULT_MAX_COLUMNS,
                ) {
                    writeln!(out, "{line}")?;
                }
                Ok(())
            })
        }
        (CommandOutput::View(report), OutputFormat::Table) => {
            write_view(out, report, |out, series, title| {
                writeln!(out, "{title}")?;
                write_bar_table(out, series)
            })
        }
        (CommandOutput::Intervals(rows), _) => write_intervals(out, rows),
    }
}

fn write_json<W: Write, T: serde::Serialize + ?Sized>(
    out: &mut W,
    value: &T,
    pretty: bool,
) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_view<W, F>(out: &mut W, report: &ViewReport, mut body: F) -> Result<(), CliError>
where
    W: Write,
    F: FnMut(&mut W, &BarSeries, &str) -> io::Result<()>,
{
    for (index, outcome) in report.panels.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        writeln!(out, "── Panel {} ──", index + 1)?;
        match outcome {
            PanelOutcome::Rendered(panel) => {
                writeln!(out, "{}", panel.heading)?;
                body(out, &panel.series, &panel.title)?;
                writeln!(out, "{}", panel.caption)?;
            }
            PanelOutcome::Hint(message) => writeln!(out, "{message}")?,
            PanelOutcome::NoData(message) => writeln!(out, "warning: {message}")?,
            PanelOutcome::Error(error) => writeln!(out, "error: {}", error.message())?,
        }
    }
    Ok(())
}

fn write_bar_table<W: Write>(out: &mut W, series: &BarSeries) -> io::Result<()> {
    writeln!(
        out,
        "{:<20}  {:>10}  {:>10}  {:>10}  {:>10}  {:>14}",
        "timestamp", "open", "high", "low", "close", "volume"
    )?;
    for bar in series.bars() {
        let volume = bar
            .volume
            .map(|volume| format!("{volume:.0}"))
            .unwrap_or_else(|| String::from("-"));
        writeln!(
            out,
            "{:<20}  {:>10.2}  {:>10.2}  {:>10.2}  {:>10.2}  {:>14}",
            bar.ts.to_string(),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            volume
        )?;
    }
    Ok(())
}

fn write_intervals<W: Write>(out: &mut W, rows: &[IntervalRow]) -> Result<(), CliError> {
    writeln!(out, "{:<10}  {:<8}  {}", "interval", "endpoint", "bar size")?;
    for row in rows {
        let bar_size = row
            .bar_size
            .map(|size| size.to_string())
            .unwrap_or_else(|| String::from("-"));
        writeln!(out, "{:<10}  {:<8}  {}", row.label, row.endpoint, bar_size)?;
    }
    Ok(())
}
