//! Screen rendering
//!
//! Draws a composed [`Screen`] onto the round panel. The title and the
//! optional headline share the top band; text lines follow at the pitch
//! the touch hit test uses, all centred.

use embedded_graphics::mono_font::iso_8859_1::{FONT_10X20, FONT_6X10, FONT_9X15};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use dial_core::screen::{Screen, ABOUT_TEXT, LINE_HEIGHT, TITLE_HEIGHT};

/// Title baseline offset from the top edge
const TITLE_Y: i32 = 4;

/// Headline offset from the top edge
const HEADLINE_Y: i32 = 16;

/// Text colour for titles and headlines
const ACCENT: Rgb565 = Rgb565::new(31, 40, 0);

/// Draw a composed screen
pub fn draw_screen<D>(target: &mut D, screen: &Screen, width: u16) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    target.clear(Rgb565::BLACK)?;

    let centre_x = i32::from(width) / 2;
    let centred = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Top)
        .build();

    let title_style = MonoTextStyle::new(&FONT_6X10, ACCENT);
    Text::with_text_style(screen.title(), Point::new(centre_x, TITLE_Y), title_style, centred)
        .draw(target)?;

    if !screen.headline().is_empty() {
        let headline_style = MonoTextStyle::new(&FONT_10X20, Rgb565::WHITE);
        Text::with_text_style(
            screen.headline(),
            Point::new(centre_x, HEADLINE_Y),
            headline_style,
            centred,
        )
        .draw(target)?;
    }

    let line_style = MonoTextStyle::new(&FONT_9X15, Rgb565::WHITE);
    for (row, line) in screen.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let y = i32::from(TITLE_HEIGHT) + row as i32 * i32::from(LINE_HEIGHT);
        Text::with_text_style(line, Point::new(centre_x, y), line_style, centred).draw(target)?;
    }

    Ok(())
}

/// Draw the boot splash
pub fn draw_splash<D>(target: &mut D, width: u16, height: u16) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    target.clear(Rgb565::BLACK)?;

    let centre = Point::new(i32::from(width) / 2, i32::from(height) / 2);
    let style = MonoTextStyle::new(&FONT_10X20, ACCENT);
    let centred = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();
    Text::with_text_style(ABOUT_TEXT, centre, style, centred).draw(target)?;

    Ok(())
}
