//! Interactive crawl size input

use crate::ConfigError;
use std::io::{BufRead, Write};

/// Prompt shown to the operator when no crawl size is configured
const PROMPT: &str = "Enter a number of links to scrape: ";

/// Parses one line of operator input as a crawl size
///
/// Accepts a positive integer surrounded by optional whitespace.
pub fn parse_crawl_size(line: &str) -> Option<u32> {
    line.trim().parse::<u32>().ok().filter(|&n| n > 0)
}

/// Asks for the crawl size until a positive integer is entered
///
/// Running out of input before a valid answer is a configuration error.
///
/// # Example
///
/// ```
/// use wiki_relay::config::read_crawl_size;
///
/// let mut input = "ten\n10\n".as_bytes();
/// let mut output = Vec::new();
/// assert_eq!(read_crawl_size(&mut input, &mut output).unwrap(), 10);
/// ```
pub fn read_crawl_size<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<u32, ConfigError> {
    let mut line = String::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(ConfigError::Validation(
                "no crawl size given before end of input".to_string(),
            ));
        }

        match parse_crawl_size(&line) {
            Some(size) => return Ok(size),
            None => tracing::debug!("Rejected crawl size input {:?}", line.trim()),
        }
    }
}
