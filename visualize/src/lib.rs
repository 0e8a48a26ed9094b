// MIT LICENSE
//
// Copyright (c) 2021 Dash Core Group
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

//! Human-readable rendering of trees, digests and byte strings.
//!
//! Types implement [`Visualize`] by writing into a [`Drawer`], which takes
//! care of indenting nested lines.

use core::fmt;
use std::io::{Result, Write};

use itertools::Itertools;

const HEX_LEN: usize = 8;
const STR_LEN: usize = 32;
const INDENT_SPACES: usize = 4;

/// Pretty visualization of tree components.
pub trait Visualize {
    /// Write `self` into `drawer` and hand it back for further writes.
    fn visualize<W: Write>(&self, drawer: Drawer<W>) -> Result<Drawer<W>>;
}

/// Wrapper with a `Debug` implementation that shows bytes the way
/// [`Visualize`] does.
#[derive(PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct DebugBytes<'a>(pub &'a [u8]);

impl fmt::Debug for DebugBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut v = Vec::new();
        visualize_to_vec(&mut v, self.0);

        f.write_str(&String::from_utf8_lossy(&v))
    }
}

/// A `io::Write` proxy that indents every line by the current depth.
pub struct Drawer<W: Write> {
    level: usize,
    write: W,
}

impl<W: Write> Drawer<W> {
    /// Drawer at depth 0.
    pub fn new(write: W) -> Self {
        Drawer { level: 0, write }
    }

    /// Indent the following lines one step further.
    pub fn down(&mut self) {
        self.level += 1;
    }

    /// Undo one [`down`](Self::down).
    pub fn up(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Write `buf`, indenting every line break by the current depth.
    pub fn write(&mut self, buf: &[u8]) -> Result<()> {
        let sep = if self.level > 0 {
            format!("\n{}", " ".repeat(INDENT_SPACES * self.level))
        } else {
            String::from("\n")
        };
        let lines = buf.split(|c| *c == b'\n');
        for line in Itertools::intersperse(lines, sep.as_bytes()) {
            self.write.write_all(line)?;
        }
        Ok(())
    }

    /// Start a new line at the current depth.
    pub fn newline(&mut self) -> Result<()> {
        self.write(b"\n")
    }

    /// Terminate the output with a newline and flush the writer.
    pub fn flush(&mut self) -> Result<()> {
        self.write.write_all(b"\n")?;
        self.write.flush()?;
        Ok(())
    }
}

/// Hex encoding shortened to its first and last few characters.
pub fn to_hex(bytes: &[u8]) -> String {
    let encoded = hex::encode(bytes);
    let remaining = encoded.len().saturating_sub(HEX_LEN);
    if remaining >= HEX_LEN + 8 {
        format!("{}..{}", &encoded[..HEX_LEN], &encoded[remaining..])
    } else {
        encoded
    }
}

impl Visualize for [u8] {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(format!("[hex: {}", to_hex(self)).as_bytes())?;
        if let Ok(text) = std::str::from_utf8(self) {
            if !text.is_empty() && !text.chars().any(char::is_control) {
                let shown: String = text.chars().take(STR_LEN).collect();
                drawer.write(format!(", str: {shown}").as_bytes())?;
            }
        }
        drawer.write(b"]")?;
        Ok(drawer)
    }
}

impl Visualize for Vec<u8> {
    fn visualize<W: Write>(&self, drawer: Drawer<W>) -> Result<Drawer<W>> {
        self.as_slice().visualize(drawer)
    }
}

impl<const N: usize> Visualize for [u8; N] {
    fn visualize<W: Write>(&self, drawer: Drawer<W>) -> Result<Drawer<W>> {
        self.as_slice().visualize(drawer)
    }
}

impl<T: Visualize + ?Sized> Visualize for &T {
    fn visualize<W: Write>(&self, drawer: Drawer<W>) -> Result<Drawer<W>> {
        (*self).visualize(drawer)
    }
}

impl<T: Visualize> Visualize for Option<T> {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        Ok(if let Some(v) = self {
            v.visualize(drawer)?
        } else {
            drawer.write(b"None")?;
            drawer
        })
    }
}

/// `visualize` shortcut to write straight into stdout.
pub fn visualize_stdout<T: Visualize + ?Sized>(value: &T) -> Result<()> {
    let mut out = std::io::stdout();
    let mut drawer = value.visualize(Drawer::new(&mut out))?;
    drawer.flush()
}

/// `visualize` shortcut to write into a growable buffer, appending to what
/// is already there.
pub fn visualize_to_vec<T: Visualize + ?Sized>(v: &mut Vec<u8>, value: &T) {
    let drawer = Drawer::new(v);
    value
        .visualize(drawer)
        .expect("error while writing into vec");
}
