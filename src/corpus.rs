//! Instance corpus reading and writing.
//!
//! Corpus layout (whitespace separated, line breaks are not significant):
//! ```text
//! T
//! n_1
//! d_0 d_1 ... d_{n_1}
//! n_2
//! ...
//! ```
//! [`CorpusReader`] streams instances one at a time and validates as it goes:
//! a broken token stream is fatal, while an instance with bad values (zero
//! dimension, no factors, too many factors) is reported on its own and the
//! reader moves on to the next one. Instance indices in errors are 1-based.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::warn;

use crate::error::{CorpusError, Error, InstanceError};
use crate::instance::ChainInstance;

/// Whitespace tokenizer that remembers the line each token came from.
struct Tokens<R> {
    reader: R,
    buf: String,
    pending: VecDeque<String>,
    line: usize,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            pending: VecDeque::new(),
            line: 0,
        }
    }

    fn next_token(&mut self) -> Result<Option<(String, usize)>, CorpusError> {
        loop {
            if let Some(tok) = self.pending.pop_front() {
                return Ok(Some((tok, self.line)));
            }
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            self.pending
                .extend(self.buf.split_whitespace().map(str::to_owned));
        }
    }

    fn expect<T: FromStr>(&mut self, expected: &'static str) -> Result<T, CorpusError> {
        match self.next_token()? {
            None => Err(CorpusError::UnexpectedEof {
                line: self.line,
                expected,
            }),
            Some((token, line)) => token.parse().map_err(|_| CorpusError::InvalidToken {
                line,
                token,
                expected,
            }),
        }
    }
}

/// Streaming, validating reader over a corpus.
pub struct CorpusReader<R> {
    tokens: Tokens<R>,
    declared: usize,
    next: usize,
    max_n: usize,
    done: bool,
}

impl<R: BufRead> CorpusReader<R> {
    /// Read the corpus header. Chains longer than `max_n` are rejected.
    pub fn new(reader: R, max_n: usize) -> Result<Self, CorpusError> {
        let mut tokens = Tokens::new(reader);
        let declared = tokens.expect("instance count")?;
        Ok(Self {
            tokens,
            declared,
            next: 0,
            max_n,
            done: false,
        })
    }

    /// Instance count announced by the header.
    pub fn declared(&self) -> usize {
        self.declared
    }

    fn read_instance(&mut self, index: usize) -> Result<ChainInstance, Error> {
        let n: usize = self.tokens.expect("chain length")?;
        if n > self.max_n {
            // consume the dimensions so the next instance starts in the right place
            for _ in 0..=n {
                self.tokens.expect::<u32>("dimension")?;
            }
            return Err(Error::Instance {
                index,
                source: InstanceError::ChainTooLong { n, max: self.max_n },
            });
        }
        let mut dims = Vec::with_capacity(n + 1);
        for _ in 0..=n {
            dims.push(self.tokens.expect::<u32>("dimension")?);
        }
        ChainInstance::new(dims).map_err(|source| Error::Instance { index, source })
    }

    fn warn_on_trailing(&mut self) {
        if let Ok(Some((token, line))) = self.tokens.next_token() {
            warn!(
                line,
                token = %token,
                declared = self.declared,
                "ignoring tokens after the last declared instance"
            );
        }
    }
}

impl<R: BufRead> Iterator for CorpusReader<R> {
    type Item = Result<ChainInstance, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.next >= self.declared {
            self.done = true;
            self.warn_on_trailing();
            return None;
        }
        self.next += 1;
        let item = self.read_instance(self.next);
        if matches!(&item, Err(e) if e.is_fatal()) {
            self.done = true;
        }
        Some(item)
    }
}

/// Write instances in corpus layout, header first.
pub fn write_corpus<W: Write>(mut out: W, instances: &[ChainInstance]) -> io::Result<()> {
    write_header(&mut out, instances.len())?;
    for inst in instances {
        write_instance(&mut out, inst)?;
    }
    out.flush()
}

/// Corpus header: the number of instances that follow.
pub fn write_header<W: Write>(out: &mut W, count: usize) -> io::Result<()> {
    writeln!(out, "{count}")
}

/// One instance record: its length on one line, its dimensions on the next.
pub fn write_instance<W: Write>(out: &mut W, instance: &ChainInstance) -> io::Result<()> {
    writeln!(out, "{}", instance.len())?;
    let mut first = true;
    for d in instance.dims() {
        if first {
            write!(out, "{d}")?;
            first = false;
        } else {
            write!(out, " {d}")?;
        }
    }
    writeln!(out)
}
