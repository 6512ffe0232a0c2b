//! ## RAD-50 codec
//!
//! Three characters from a 40 symbol alphabet are packed into one word as
//! `c1*1600 + c2*40 + c3`.  File names are two words of base and one word of extension.
//! Characters outside the alphabet are folded to space, so encoding never fails.

const ALPHABET: [u8;40] = *b" ABCDEFGHIJKLMNOPQRSTUVWXYZ$.%0123456789";

fn index_of(c: char) -> u16 {
    let up = c.to_ascii_uppercase();
    match ALPHABET.iter().position(|x| *x as char==up) {
        Some(i) => i as u16,
        None => 0
    }
}

fn symbol(i: u16) -> char {
    match ALPHABET.get(i as usize) {
        Some(c) => *c as char,
        None => ' '
    }
}

/// Encode up to 3 characters, missing characters are spaces
pub fn encode(s: &str) -> u16 {
    let mut chars = s.chars();
    let mut ans: u16 = 0;
    for _i in 0..3 {
        let idx = match chars.next() {
            Some(c) => index_of(c),
            None => 0
        };
        ans = ans*40 + idx;
    }
    ans
}

/// Decode all three characters, including spaces
fn decode_raw(word: u16) -> String {
    let mut ans = String::new();
    ans.push(symbol(word/1600));
    ans.push(symbol((word/40)%40));
    ans.push(symbol(word%40));
    ans
}

/// Decode a word, trailing spaces are trimmed
pub fn decode(word: u16) -> String {
    decode_raw(word).trim_end().to_string()
}

/// Encode a name of the form `BASE.EXT`, base is cut to 6 and extension to 3 characters.
/// Returns the words in disk order `[name1,name2,ext]`.
pub fn encode_name(name: &str) -> [u16;3] {
    let (base,ext) = match name.split_once('.') {
        Some((b,e)) => (b,e),
        None => (name,"")
    };
    let base: String = base.chars().take(6).collect();
    let ext: String = ext.chars().take(3).collect();
    let first: String = base.chars().take(3).collect();
    let second: String = base.chars().skip(3).collect();
    [encode(&first),encode(&second),encode(&ext)]
}

/// Decode the three name words into `BASE` or `BASE.EXT`
pub fn decode_name(words: [u16;3]) -> String {
    let base = [decode_raw(words[0]),decode_raw(words[1])].concat();
    let base: String = base.trim_end().chars().take(6).collect();
    let ext: String = decode(words[2]).chars().take(3).collect();
    match ext.len() {
        0 => base,
        _ => [base,ext].join(".")
    }
}
