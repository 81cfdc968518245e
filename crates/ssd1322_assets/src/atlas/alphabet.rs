/// Characters compiled into every font, in increasing code-point order: ASCII punctuation,
/// digits, uppercase and lowercase letters.
pub const ALPHABET: &str =
    "!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";
