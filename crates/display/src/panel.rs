use crate::framebuffer::Framebuffer;
use crate::logo::load_logo;
use embedded_graphics::{
    geometry::{Point as EgPoint, Size as EgSize},
    mono_font::{iso_8859_15, MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, Primitive as _, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use image::{GrayImage, ImageFormat, Luma};
use std::path::{Path, PathBuf};
use ticker_config::DisplayConfig;
use ticker_core::{
    DisplaySink, Fill, Label, Point, Primitive, Rect, RedrawMode, RenderError, Result,
};
use ticker_renderer::Layout;
use tracing::{debug, info};

/// Refresh counters since the panel was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshStats {
    pub full:    u64,
    pub partial: u64,
    /// Partial refreshes with nothing to update.
    pub skipped: u64,
}

/// E-paper style panel backed by a 1-bit framebuffer.
///
/// Every visible refresh writes the frame to a PNG file. A partial refresh
/// only touches the file when pixels changed since the last refresh; a full
/// refresh always rewrites it.
#[derive(Debug)]
pub struct Panel {
    frame:  Framebuffer,
    /// Frame as of the last visible refresh.
    shown:  Option<Vec<BinaryColor>>,
    output: PathBuf,
    stats:  RefreshStats,
}

impl Panel {
    /// Create a blank panel sized to `layout`, with the logo composited in.
    pub fn new(config: &DisplayConfig, layout: &Layout) -> Result<Self> {
        let mut frame = Framebuffer::new(layout.panel.width, layout.panel.height);

        if let Some(path) = &config.logo {
            let logo = load_logo(path, layout.logo)?;
            frame.draw_iter(logo).ok();
            info!("Loaded logo from '{}'", path.display());
        }

        Ok(Self {
            frame,
            shown: None,
            output: config.output.clone(),
            stats: RefreshStats::default(),
        })
    }

    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    pub fn stats(&self) -> RefreshStats {
        self.stats
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    fn draw_primitive(&mut self, primitive: &Primitive) {
        match *primitive {
            Primitive::Rect { rect, fill } => {
                to_rectangle(rect)
                    .into_styled(PrimitiveStyle::with_fill(ink(fill)))
                    .draw(&mut self.frame)
                    .ok();
            }
            Primitive::Line { from, to, fill } => {
                Line::new(to_point(from), to_point(to))
                    .into_styled(PrimitiveStyle::with_stroke(ink(fill), 1))
                    .draw(&mut self.frame)
                    .ok();
            }
        }
    }

    /// Write the current frame, replacing the output file atomically.
    fn write(&self) -> Result<(), RenderError> {
        let frame = &self.frame;
        let image = GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
            if frame.is_ink(x as i32, y as i32) {
                Luma([0])
            } else {
                Luma([255])
            }
        });

        let mut tmp = self.output.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        image
            .save_with_format(&tmp, ImageFormat::Png)
            .map_err(|e| RenderError::Flush(format!("cannot write '{}': {e}", tmp.display())))?;
        std::fs::rename(&tmp, &self.output)?;
        Ok(())
    }
}

impl DisplaySink for Panel {
    /// Clears the label band to the right panel edge, then draws the text.
    fn draw_label(&mut self, label: &Label) -> Result<(), RenderError> {
        let font = font_for(label.size);
        let band = Rectangle::new(
            to_point(label.origin),
            EgSize::new(
                self.frame.width().saturating_sub(label.origin.x.max(0) as u32),
                font.character_size.height,
            ),
        );
        band.into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
            .draw(&mut self.frame)
            .ok();

        let style = MonoTextStyle::new(font, BinaryColor::On);
        Text::with_baseline(&label.text, to_point(label.origin), style, Baseline::Top)
            .draw(&mut self.frame)
            .ok();
        Ok(())
    }

    fn draw_region(&mut self, primitives: &[Primitive]) -> Result<(), RenderError> {
        for primitive in primitives {
            self.draw_primitive(primitive);
        }
        Ok(())
    }

    fn flush(&mut self, mode: RedrawMode) -> Result<(), RenderError> {
        match mode {
            RedrawMode::Full => {
                self.write()?;
                self.stats.full += 1;
                debug!(output = %self.output.display(), "full refresh");
            }
            RedrawMode::Partial => {
                let changed = self
                    .shown
                    .as_deref()
                    .map_or(self.frame.pixels().len(), |shown| self.frame.diff_count(shown));
                if changed == 0 {
                    self.stats.skipped += 1;
                    debug!("partial refresh skipped, frame unchanged");
                    return Ok(());
                }
                self.write()?;
                self.stats.partial += 1;
                debug!(changed, "partial refresh");
            }
        }
        self.shown = Some(self.frame.pixels().to_vec());
        Ok(())
    }
}

/// Largest built-in font not taller than `size`, ISO-8859-15 so `€` renders.
fn font_for(size: u32) -> &'static MonoFont<'static> {
    match size {
        0..=7   => &iso_8859_15::FONT_5X7,
        8..=9   => &iso_8859_15::FONT_5X8,
        10..=12 => &iso_8859_15::FONT_6X10,
        13..=14 => &iso_8859_15::FONT_6X13,
        15..=17 => &iso_8859_15::FONT_9X15,
        18..=19 => &iso_8859_15::FONT_9X18,
        _       => &iso_8859_15::FONT_10X20,
    }
}

fn ink(fill: Fill) -> BinaryColor {
    match fill {
        Fill::Black => BinaryColor::On,
        Fill::White => BinaryColor::Off,
    }
}

fn to_point(p: Point) -> EgPoint {
    EgPoint::new(p.x, p.y)
}

fn to_rectangle(r: Rect) -> Rectangle {
    Rectangle::new(to_point(r.origin), EgSize::new(r.size.width, r.size.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticker_config::TickerConfig;

    fn panel(name: &str) -> Panel {
        let config = DisplayConfig {
            output: std::env::temp_dir().join(format!(
                "ticker-panel-{}-{name}.png",
                std::process::id()
            )),
            logo:   None,
        };
        let layout = Layout::from_config(&TickerConfig::default());
        Panel::new(&config, &layout).unwrap()
    }

    fn label(text: &str) -> Label {
        Label {
            text:   text.to_string(),
            origin: Point::new(76, 14),
            size:   20,
        }
    }

    fn ink_in(frame: &Framebuffer, rect: Rect) -> usize {
        (rect.origin.x..rect.right())
            .flat_map(|x| (rect.origin.y..rect.bottom()).map(move |y| (x, y)))
            .filter(|&(x, y)| frame.is_ink(x, y))
            .count()
    }

    #[test]
    fn region_draws_clear_and_bars() {
        let mut p = panel("region");
        let chart = Rect::new(76, 48, 124, 48);
        p.draw_region(&[
            Primitive::Rect { rect: chart, fill: Fill::Black },
            Primitive::Rect { rect: chart, fill: Fill::White },
            Primitive::Line { from: Point::new(80, 90), to: Point::new(80, 95), fill: Fill::Black },
        ])
        .unwrap();
        assert_eq!(ink_in(p.frame(), chart), 6);
        assert!(p.frame().is_ink(80, 95));
        assert!(!p.frame().is_ink(80, 89));
    }

    #[test]
    fn label_replaces_previous_text() {
        let mut p = panel("label");
        let band = Rect::new(76, 14, 124, 20);

        p.draw_label(&label("88888.88 €")).unwrap();
        let wide = ink_in(p.frame(), band);
        assert!(wide > 0);

        p.draw_label(&label("1")).unwrap();
        let narrow = ink_in(p.frame(), band);
        assert!(narrow > 0 && narrow < wide);
    }

    #[test]
    fn full_flush_writes_png() {
        let mut p = panel("full");
        p.draw_label(&label("90.00 €")).unwrap();
        p.flush(RedrawMode::Full).unwrap();

        let written = image::open(p.output()).unwrap().to_luma8();
        assert_eq!(written.dimensions(), (200, 96));
        assert!(written.pixels().any(|px| px.0[0] == 0));
        assert_eq!(p.stats().full, 1);
        std::fs::remove_file(p.output()).ok();
    }

    #[test]
    fn partial_flush_skips_unchanged_frame() {
        let mut p = panel("partial");
        p.flush(RedrawMode::Full).unwrap();
        p.flush(RedrawMode::Partial).unwrap();
        assert_eq!(p.stats(), RefreshStats { full: 1, partial: 0, skipped: 1 });

        p.draw_region(&[Primitive::Line {
            from: Point::new(100, 60),
            to:   Point::new(100, 95),
            fill: Fill::Black,
        }])
        .unwrap();
        p.flush(RedrawMode::Partial).unwrap();
        assert_eq!(p.stats(), RefreshStats { full: 1, partial: 1, skipped: 1 });
        std::fs::remove_file(p.output()).ok();
    }

    #[test]
    fn flush_to_missing_directory_fails() {
        let config = DisplayConfig {
            output: PathBuf::from("/nonexistent-dir/ticker/out.png"),
            logo:   None,
        };
        let layout = Layout::from_config(&TickerConfig::default());
        let mut p = Panel::new(&config, &layout).unwrap();
        assert!(p.flush(RedrawMode::Full).is_err());
    }

    #[test]
    fn font_never_taller_than_requested() {
        for size in 7..40 {
            assert!(font_for(size).character_size.height <= size.max(7));
        }
    }
}
