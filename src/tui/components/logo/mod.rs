//! SchemaX logo
//!
//! Block letter word mark with a horizontal color gradient, used as the
//! header of the examples page.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};

/// Options for rendering the logo
#[derive(Debug, Clone)]
pub struct LogoOpts {
    pub gradient_start: Color,
    pub gradient_end: Color,
    pub tagline_color: Color,
}

/// Represents a single letter in block form
type LetterForm = [&'static str; 3];

const S: LetterForm = ["▄▀▀▀", "▀▀▀▄", "▀▀▀ "];
const C: LetterForm = ["▄▀▀▀", "█   ", " ▀▀▀"];
const H: LetterForm = ["█  █", "█▀▀█", "▀  ▀"];
const E: LetterForm = ["█▀▀▀", "█▀▀ ", "▀▀▀▀"];
const M: LetterForm = ["█▄ ▄█", "█ ▀ █", "▀   ▀"];
const A: LetterForm = ["▄▀▀▄", "█▀▀█", "▀  ▀"];
const X: LetterForm = ["▀▄ ▄▀", " ▄▀▄ ", "▀   ▀"];

const WORD: [LetterForm; 7] = [S, C, H, E, M, A, X];

/// Render the logo followed by `tagline`
pub fn render_logo(tagline: &str, opts: &LogoOpts) -> Text<'static> {
    let rows: Vec<String> = (0..3)
        .map(|row| {
            WORD.iter()
                .map(|letter| letter[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let gradient = linear_gradient(opts.gradient_start, opts.gradient_end, width);

    let mut lines: Vec<Line> = rows
        .iter()
        .map(|row| {
            Line::from(
                row.chars()
                    .enumerate()
                    .map(|(i, ch)| {
                        if ch == ' ' {
                            Span::raw(" ")
                        } else {
                            Span::styled(ch.to_string(), Style::default().fg(gradient[i]))
                        }
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    lines.push(Line::from(Span::styled(
        tagline.to_string(),
        Style::default().fg(opts.tagline_color),
    )));
    Text::from(lines)
}

/// `steps` colors from `start` to `end`; non RGB colors do not blend
fn linear_gradient(start: Color, end: Color, steps: usize) -> Vec<Color> {
    let (Color::Rgb(r0, g0, b0), Color::Rgb(r1, g1, b1)) = (start, end) else {
        return vec![start; steps];
    };
    let lerp = |a: u8, b: u8, t: f32| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    (0..steps)
        .map(|i| {
            let t = if steps > 1 {
                i as f32 / (steps - 1) as f32
            } else {
                0.0
            };
            Color::Rgb(lerp(r0, r1, t), lerp(g0, g1, t), lerp(b0, b1, t))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        let colors = linear_gradient(Color::Rgb(0, 0, 0), Color::Rgb(200, 100, 50), 5);
        assert_eq!(colors.len(), 5);
        assert_eq!(colors[0], Color::Rgb(0, 0, 0));
        assert_eq!(colors[4], Color::Rgb(200, 100, 50));
    }

    #[test]
    fn test_logo_has_three_rows_and_tagline() {
        let opts = LogoOpts {
            gradient_start: Color::Rgb(147, 51, 234),
            gradient_end: Color::Rgb(2, 132, 199),
            tagline_color: Color::Gray,
        };
        let text = render_logo("Database diagrams", &opts);
        assert_eq!(text.lines.len(), 4);
    }
}
