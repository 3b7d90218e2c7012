//! Virtual terminal backend for render tests.
//!
//! Frames are encoded as ANSI and fed through a `vt100::Parser`, so the
//! assertions see what a real terminal would show.

use std::fmt;
use std::io::{self, Write};

use crossterm::{Command, cursor, style, terminal};
use ratatui::backend::{Backend, ClearType, WindowSize};
use ratatui::buffer::Cell;
use ratatui::layout::{Position, Size};
use ratatui::style::{Color, Modifier, Style};

pub struct VT100Backend {
    parser: vt100::Parser,
    size: Size,
}

impl VT100Backend {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            parser: vt100::Parser::new(height, width, 0),
            size: Size::new(width, height),
        }
    }

    pub fn screen(&self) -> &vt100::Screen {
        self.parser.screen()
    }

    /// Screen text, rows joined by newlines.
    pub fn contents(&self) -> String {
        self.parser.screen().contents()
    }

    /// Row index of the first line containing `needle`.
    #[allow(dead_code)]
    pub fn find_row(&self, needle: &str) -> Option<u16> {
        self.contents()
            .lines()
            .position(|line| line.contains(needle))
            .and_then(|row| u16::try_from(row).ok())
    }

    fn emit(&mut self, command: impl Command) {
        let mut buf = String::new();
        let _ = command.write_ansi(&mut buf);
        self.parser.process(buf.as_bytes());
    }
}

impl Write for VT100Backend {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.parser.process(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Display for VT100Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.contents())
    }
}

fn write_style(buf: &mut String, cell_style: Style) {
    let _ = style::SetAttribute(style::Attribute::Reset).write_ansi(buf);
    if let Some(fg) = cell_style.fg.and_then(to_crossterm_color) {
        let _ = style::SetForegroundColor(fg).write_ansi(buf);
    }
    if let Some(bg) = cell_style.bg.and_then(to_crossterm_color) {
        let _ = style::SetBackgroundColor(bg).write_ansi(buf);
    }
    if cell_style.add_modifier.contains(Modifier::BOLD) {
        let _ = style::SetAttribute(style::Attribute::Bold).write_ansi(buf);
    }
}

impl Backend for VT100Backend {
    type Error = io::Error;

    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = (u16, u16, &'a Cell)>,
    {
        use std::fmt::Write as _;

        let mut buf = String::new();
        let mut next_pos: Option<(u16, u16)> = None;
        let mut current: Option<Style> = None;

        for (x, y, cell) in content {
            if next_pos != Some((x, y)) {
                let _ = cursor::MoveTo(x, y).write_ansi(&mut buf);
            }
            let cell_style = cell.style();
            if current != Some(cell_style) {
                write_style(&mut buf, cell_style);
                current = Some(cell_style);
            }
            let _ = buf.write_str(cell.symbol());
            next_pos = Some((x + 1, y));
        }

        self.parser.process(buf.as_bytes());
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn get_cursor_position(&mut self) -> io::Result<Position> {
        let (row, col) = self.parser.screen().cursor_position();
        Ok(Position::new(col, row))
    }

    fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
        let pos = position.into();
        self.emit(cursor::MoveTo(pos.x, pos.y));
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.emit(terminal::Clear(terminal::ClearType::All));
        Ok(())
    }

    fn clear_region(&mut self, _clear_type: ClearType) -> io::Result<()> {
        self.clear()
    }

    fn size(&self) -> io::Result<Size> {
        Ok(self.size)
    }

    fn window_size(&mut self) -> io::Result<WindowSize> {
        Ok(WindowSize {
            columns_rows: self.size,
            pixels: Size::new(self.size.width * 8, self.size.height * 16),
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn to_crossterm_color(color: Color) -> Option<style::Color> {
    use style::Color as C;

    Some(match color {
        Color::Reset => return None,
        Color::Black => C::Black,
        Color::Red => C::DarkRed,
        Color::Green => C::DarkGreen,
        Color::Yellow => C::DarkYellow,
        Color::Blue => C::DarkBlue,
        Color::Magenta => C::DarkMagenta,
        Color::Cyan => C::DarkCyan,
        Color::Gray => C::Grey,
        Color::DarkGray => C::DarkGrey,
        Color::LightRed => C::Red,
        Color::LightGreen => C::Green,
        Color::LightYellow => C::Yellow,
        Color::LightBlue => C::Blue,
        Color::LightMagenta => C::Magenta,
        Color::LightCyan => C::Cyan,
        Color::White => C::White,
        Color::Rgb(r, g, b) => C::Rgb { r, g, b },
        Color::Indexed(i) => C::AnsiValue(i),
    })
}
