//! [`textwrap`] helpers.

use textwrap::Options;
use textwrap::WordSeparator;
use textwrap::WordSplitter;

/// Get [`textwrap`] options for text indented by `indent` on every line.
///
/// Long words like URLs are left intact rather than broken across lines.
pub fn indented_options(indent: &str) -> Options<'_> {
    let opts = Options::with_termwidth()
        .initial_indent(indent)
        .subsequent_indent(indent)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation);

    // In tests, the terminal is always 80 characters wide.
    if cfg!(test) {
        opts.width(80)
    } else {
        opts
    }
}
