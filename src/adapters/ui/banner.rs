//! Startup banner: "CONTENT-PULSE" in figlet's standard font with a vertical gradient.
//! The palette is shared with the prompt theme.

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{self, Write, stdout};

const TITLE: &str = "CONTENT-PULSE";
const TAGLINE: &str = "Content performance, clusters and leads at a glance";

pub(crate) type Rgb = (u8, u8, u8);

/// Signal orange (#ff7a18).
pub(crate) const PULSE_ORANGE: Rgb = (0xff, 0x7a, 0x18);
/// Chart teal (#14b8a6).
pub(crate) const CHART_TEAL: Rgb = (0x14, 0xb8, 0xa6);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let mix = |x: u8, y: u8| (f64::from(x) * (1.0 - t) + f64::from(y) * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// One color per row, evenly spaced from `from` to `to`. A single row gets `to`.
fn gradient(rows: usize, from: Rgb, to: Rgb) -> Vec<Rgb> {
    let steps = rows.saturating_sub(1);
    (0..rows)
        .map(|i| match steps {
            0 => to,
            n => lerp_rgb(from, to, i as f64 / n as f64),
        })
        .collect()
}

fn fg((r, g, b): Rgb) -> SetForegroundColor {
    SetForegroundColor(Color::Rgb { r, g, b })
}

/// Figlet art for the title; plain text if the font cannot render it.
fn render_title() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(TITLE).map(|figure| figure.to_string()))
        .unwrap_or_else(|| TITLE.to_string())
}

fn write_banner(out: &mut impl Write) -> io::Result<()> {
    let art = render_title();
    let rows: Vec<&str> = art.lines().collect();
    for (row, color) in rows.iter().zip(gradient(rows.len(), PULSE_ORANGE, CHART_TEAL)) {
        queue!(out, fg(color), Print(row), Print("\r\n"))?;
    }
    queue!(
        out,
        fg(CHART_TEAL),
        Print(format!("v{}\r\n", env!("CARGO_PKG_VERSION"))),
        Print(TAGLINE),
        Print("\r\n"),
        ResetColor
    )?;
    out.flush()
}

/// Prints the welcome banner, then version and tagline. Terminal write errors are ignored.
pub fn print_welcome() {
    let _ = write_banner(&mut stdout().lock());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_runs_orange_to_teal() {
        let colors = gradient(6, PULSE_ORANGE, CHART_TEAL);
        assert_eq!(colors.len(), 6);
        assert_eq!(colors[0], PULSE_ORANGE);
        assert_eq!(colors[5], CHART_TEAL);
        assert_eq!(gradient(1, PULSE_ORANGE, CHART_TEAL), vec![CHART_TEAL]);
        assert!(gradient(0, PULSE_ORANGE, CHART_TEAL).is_empty());
    }

    #[test]
    fn banner_ends_with_version_and_tagline() {
        let mut buf = Vec::new();
        write_banner(&mut buf).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains(TAGLINE));
        assert!(text.contains(&format!("v{}", env!("CARGO_PKG_VERSION"))));
        assert!(render_title().lines().count() > 1);
    }
}
