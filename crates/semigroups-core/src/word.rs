// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Words over the letters `0..n` of a generating set.

/// A word over generator letters; letter `a` denotes the `a`-th generator.
pub type Word = Vec<usize>;

/// Renders a word as `[a, b, c]`, or `ε` for the empty word.
pub fn word_to_string(word: &[usize]) -> String {
    if word.is_empty() {
        return "ε".to_string();
    }
    let letters = word
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<String>>()
        .join(", ");
    format!("[{}]", letters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_to_string_empty() {
        assert_eq!(word_to_string(&[]), "ε");
    }

    #[test]
    fn test_word_to_string_letters() {
        assert_eq!(word_to_string(&[0, 1, 1]), "[0, 1, 1]");
    }
}
