use crate::error::{Error, Result};
use std::collections::{BTreeMap, VecDeque};
use std::ops::Bound::*;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Raw(Input),
    Ctrl(Input),
    Meta(Input),
    Shift(Input),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Input {
    Chars(String),
    Function(u8),
    Arrow(Direction),
    Page(Direction),
    Return,
    Enter,
    Tab,
    BackSpace,
    Delete,
    Escape,
    Home,
    End,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

lazy_static! {
    pub static ref CTRL_KEY_DICT: BTreeMap<Vec<u8>, Event> =
        (0u8..32).map(|x| (vec![x], Event::Ctrl(Input::Chars(((x + 64) as char).to_string()))))
                 .collect();
    pub static ref TERMINFO_KEY_DICT: BTreeMap<String, Event> = {
        [("kcuu1", Event::Raw(Input::Arrow(Direction::Up))),
         ("kcud1", Event::Raw(Input::Arrow(Direction::Down))),
         ("kcub1", Event::Raw(Input::Arrow(Direction::Left))),
         ("kcuf1", Event::Raw(Input::Arrow(Direction::Right))),
         ("kdch1", Event::Raw(Input::Delete)),
         ("khome", Event::Raw(Input::Home)),
         ("kend", Event::Raw(Input::End)),
         ("kpp", Event::Raw(Input::Page(Direction::Up))),
         ("knp", Event::Raw(Input::Page(Direction::Down)))].iter()
                                                          .map(|(k, v)| (k.to_string(), v.clone()))
                                                          .chain((1u8..64).map(|i| {
                                                                              (format!("kf{}", i),
                                                                               Event::Raw(Input::Function(i)))
                                                                          }))
                                                          .collect()
    };
    pub static ref DEFAULT_KEY_DICT: BTreeMap<Vec<u8>, Event> = {
        [("\u{1b}[A", Input::Arrow(Direction::Up)),
         ("\u{1b}[B", Input::Arrow(Direction::Down)),
         ("\u{1b}[D", Input::Arrow(Direction::Left)),
         ("\u{1b}[C", Input::Arrow(Direction::Right)),
         ("\u{1b}OA", Input::Arrow(Direction::Up)),
         ("\u{1b}OB", Input::Arrow(Direction::Down)),
         ("\u{1b}OD", Input::Arrow(Direction::Left)),
         ("\u{1b}OC", Input::Arrow(Direction::Right)),
         ("\u{1b}[H", Input::Home),
         ("\u{1b}[F", Input::End),
         ("\u{08}", Input::BackSpace),
         ("\t", Input::Tab),
         ("\n", Input::Enter),
         ("\r", Input::Return),
         ("\u{1b}", Input::Escape),
         ("\u{7f}", Input::Delete)].iter()
                                   .map(|(k, v)| {
                                       vec![(k.as_bytes().to_vec(), Event::Raw(v.clone())),
                                            ((String::from("\u{1b}") + k).into_bytes(), Event::Meta(v.clone())),]
                                   })
                                   .flatten()
                                   .collect()
    };
    pub static ref MOD_ARROW_KEY_DICT: BTreeMap<Vec<u8>, Event> = {
        let arrows = [("\u{1b}[1;5A", Event::Ctrl(Input::Arrow(Direction::Up))),
                      ("\u{1b}[1;5B", Event::Ctrl(Input::Arrow(Direction::Down))),
                      ("\u{1b}[1;5D", Event::Ctrl(Input::Arrow(Direction::Left))),
                      ("\u{1b}[1;5C", Event::Ctrl(Input::Arrow(Direction::Right))),
                      ("\u{1b}[1;2A", Event::Shift(Input::Arrow(Direction::Up))),
                      ("\u{1b}[1;2B", Event::Shift(Input::Arrow(Direction::Down))),
                      ("\u{1b}[1;2D", Event::Shift(Input::Arrow(Direction::Left))),
                      ("\u{1b}[1;2C", Event::Shift(Input::Arrow(Direction::Right)))];
        arrows.iter().map(|(k, v)| (k.as_bytes().to_vec(), v.clone())).collect()
    };
}

/// Byte-sequence table for a terminal: control keys, ANSI defaults, then whatever terminfo declares.
pub fn pattern_dict<'a, I>(terminfo_strings: I) -> BTreeMap<Vec<u8>, Event>
    where I: IntoIterator<Item = (&'a str, &'a Vec<u8>)>
{
    let terminfo_dict = terminfo_strings.into_iter()
                                        .filter_map(|(k, v)| TERMINFO_KEY_DICT.get(k).map(|e| (v.clone(), e.clone())))
                                        .collect::<BTreeMap<Vec<u8>, Event>>();
    CTRL_KEY_DICT.clone()
                 .into_iter()
                 .chain(DEFAULT_KEY_DICT.clone().into_iter())
                 .chain(MOD_ARROW_KEY_DICT.clone().into_iter())
                 .chain(terminfo_dict.into_iter())
                 .collect()
}

/// Turns raw tty bytes into key events.
///
/// A buffer that is a strict prefix of a known sequence is held back until
/// more bytes arrive or the caller gives up waiting and calls [`flush`](Self::flush).
pub struct KeyDecoder {
    patterns: BTreeMap<Vec<u8>, Event>,
    buf: Vec<u8>,
    ready: VecDeque<Event>,
}

impl KeyDecoder {
    pub fn new(patterns: BTreeMap<Vec<u8>, Event>) -> Self {
        Self { patterns,
               buf: Vec::new(),
               ready: VecDeque::new() }
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.buf.push(*b);
            self.resolve(false);
        }
    }

    pub fn flush(&mut self) {
        self.resolve(true)
    }

    pub fn is_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    pub fn next_event(&mut self) -> Option<Event> {
        self.ready.pop_front()
    }

    fn has_longer_match(&self) -> bool {
        match self.patterns.range::<Vec<u8>, _>((Excluded(&self.buf), Unbounded::<&Vec<u8>>)).next() {
            Some((k, _)) => k.starts_with(&self.buf),
            None => false,
        }
    }

    fn resolve(&mut self, flush: bool) {
        if self.buf.is_empty() || (!flush && self.has_longer_match()) {
            return;
        }
        if let Some(e) = self.patterns.get(&self.buf) {
            self.ready.push_back(e.clone());
            self.buf.clear();
            return;
        }
        match std::str::from_utf8(&self.buf) {
            Ok(s) => self.ready.push_back(Event::Raw(Input::Chars(s.to_owned()))),
            // incomplete multi-byte character
            Err(e) if e.error_len().is_none() && !flush => return,
            Err(_) => {
                let s = String::from_utf8_lossy(&self.buf).into_owned();
                self.ready.push_back(Event::Raw(Input::Chars(s)))
            },
        }
        self.buf.clear();
    }
}

/// Parses a comma separated key script such as `left,left,z,q`.
pub fn parse_key_script(script: &str) -> Result<Vec<Event>> {
    script.split(',')
          .map(str::trim)
          .filter(|t| !t.is_empty())
          .map(|token| {
              let input = match token.to_ascii_lowercase().as_str() {
                  "left" => Input::Arrow(Direction::Left),
                  "right" => Input::Arrow(Direction::Right),
                  "up" => Input::Arrow(Direction::Up),
                  "down" => Input::Arrow(Direction::Down),
                  "enter" => Input::Return,
                  "esc" => Input::Escape,
                  _ if token.chars().count() == 1 => Input::Chars(token.to_owned()),
                  _ => return Err(Error::config(format!("unknown key '{}' in key script", token))),
              };
              Ok(Event::Raw(input))
          })
          .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoder() -> KeyDecoder {
        let strings = vec![("kcuu1", b"\x1bOA".to_vec()), ("cup", b"\x1b[%i%p1%d;%p2%dH".to_vec())];
        KeyDecoder::new(pattern_dict(strings.iter().map(|(k, v)| (*k, v))))
    }

    fn drain(d: &mut KeyDecoder) -> Vec<Event> {
        std::iter::from_fn(|| d.next_event()).collect()
    }

    #[test]
    fn arrow_sequences() {
        let mut d = decoder();
        d.feed(b"\x1b[D\x1bOA");
        assert_eq!(drain(&mut d),
                   vec![Event::Raw(Input::Arrow(Direction::Left)), Event::Raw(Input::Arrow(Direction::Up))]);
        assert!(!d.is_pending());
    }

    #[test]
    fn split_escape_sequence_waits_for_rest() {
        let mut d = decoder();
        d.feed(b"\x1b");
        assert!(d.is_pending());
        assert_eq!(d.next_event(), None);
        d.feed(b"[C");
        assert_eq!(d.next_event(), Some(Event::Raw(Input::Arrow(Direction::Right))));
    }

    #[test]
    fn lone_escape_resolves_on_flush() {
        let mut d = decoder();
        d.feed(b"\x1b");
        d.flush();
        assert_eq!(drain(&mut d), vec![Event::Raw(Input::Escape)]);
    }

    #[test]
    fn plain_and_control_chars() {
        let mut d = decoder();
        d.feed(b"zq\x03\r");
        assert_eq!(drain(&mut d),
                   vec![Event::Raw(Input::Chars("z".into())),
                        Event::Raw(Input::Chars("q".into())),
                        Event::Ctrl(Input::Chars("C".into())),
                        Event::Raw(Input::Return)]);
    }

    #[test]
    fn multibyte_char_split_across_reads() {
        let mut d = decoder();
        let bytes = "■".as_bytes();
        d.feed(&bytes[..1]);
        assert_eq!(d.next_event(), None);
        d.feed(&bytes[1..]);
        assert_eq!(d.next_event(), Some(Event::Raw(Input::Chars("■".into()))));
    }

    #[test]
    fn key_script() {
        let keys = parse_key_script("left, z,Q,up").unwrap();
        assert_eq!(keys,
                   vec![Event::Raw(Input::Arrow(Direction::Left)),
                        Event::Raw(Input::Chars("z".into())),
                        Event::Raw(Input::Chars("Q".into())),
                        Event::Raw(Input::Arrow(Direction::Up))]);
        assert!(parse_key_script("sideways").is_err());
    }
}
