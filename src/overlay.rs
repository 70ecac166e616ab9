//! Rendered surfaces together with their text annotations.
//!
//! A [`Label`] is rasterized into its surface the moment it is added to a
//! [`Frame`], and kept alongside the pixels so callers can see which
//! captions a surface carries.

use anyhow::Result;
use image::Rgb;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::canvas::{rgb, DrawingSurface, PixelBuffer};


/// Horizontal alignment of a label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// A text annotation. `(x, y)` is the baseline anchor in surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Rgb<u8>,
    pub anchor: Anchor,
    pub vertical: bool, // reads bottom to top
    pub backdrop: bool, // translucent white box behind the text
}

impl Label {
    pub fn new(text: impl Into<String>, x: f32, y: f32, size: f32, color: Rgb<u8>) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size,
            color,
            anchor: Anchor::Start,
            vertical: false,
            backdrop: false,
        }
    }

    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }

    pub fn with_backdrop(mut self) -> Self {
        self.backdrop = true;
        self
    }

    /// Rasterizes the label onto `area`.
    pub fn draw(&self, area: &DrawingSurface<'_>) -> Result<()> {
        let h_pos = match self.anchor {
            Anchor::Start => HPos::Left,
            Anchor::Middle => HPos::Center,
            Anchor::End => HPos::Right,
        };
        let mut font = ("sans-serif", self.size as f64).into_font();
        if self.vertical {
            font = font.transform(FontTransform::Rotate270);
        }
        let style = font
            .color(&rgb(self.color.0))
            .pos(Pos::new(h_pos, VPos::Bottom));
        let at = (self.x.round() as i32, self.y.round() as i32);

        if self.backdrop {
            let (width, height) = area.estimate_text_size(&self.text, &style)?;
            let (width, height) = (width as i32, height as i32);
            let left = match h_pos {
                HPos::Left => at.0,
                HPos::Center => at.0 - width / 2,
                HPos::Right => at.0 - width,
            };
            area.draw(&Rectangle::new(
                [(left - 3, at.1 - height - 2), (left + width + 3, at.1 + 2)],
                WHITE.mix(0.8).filled(),
            ))?;
        }
        area.draw_text(&self.text, &style, at)?;
        Ok(())
    }
}

/// One rendered surface for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub buffer: PixelBuffer,
    pub labels: Vec<Label>,
}

impl Frame {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            buffer: PixelBuffer::new(width, height, background),
            labels: Vec::new(),
        }
    }

    /// Draws `label` into the surface and records it.
    pub fn label(&mut self, label: Label) {
        self.buffer.draw(|area| label.draw(area));
        self.labels.push(label);
    }

    /// Looks up a label by its text.
    pub fn find_label(&self, text: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.text == text)
    }
}
