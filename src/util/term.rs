// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Terminal environment utilities.
//!
//! Changes the terminal emulator's background colour using OSC (Operating
//! System Command) escape sequences. Most modern terminals (XTerm, iTerm2,
//! Alacritty, Kitty) support these; others ignore them.

use std::io::{self, Write};

/// Sets the terminal background color (OSC 11) to a hex string such as
/// `"#1e1e1e"`.
pub(crate) fn set_terminal_bg(out: &mut impl Write, hex_color: &str) -> io::Result<()> {
    write!(out, "\x1b]11;{}\x07", hex_color)?;
    out.flush()
}

/// Reverts the terminal background to the user's configured default
/// (OSC 111).
pub(crate) fn reset_terminal_bg(out: &mut impl Write) -> io::Result<()> {
    write!(out, "\x1b]111\x07")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn background_escape_sequences() {
        let mut out = Vec::new();
        set_terminal_bg(&mut out, "#281432").unwrap();
        reset_terminal_bg(&mut out).unwrap();

        assert_eq!(out, b"\x1b]11;#281432\x07\x1b]111\x07");
    }
}
