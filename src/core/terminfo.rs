use std::collections::HashMap;
use term::terminfo;

lazy_static! {
    // Used when the terminfo database is missing an entry.
    static ref ANSI_FALLBACK: HashMap<&'static str, &'static str> =
        [("cup", "\u{1b}[%i%p1%d;%p2%dH"),
         ("clear", "\u{1b}[H\u{1b}[2J"),
         ("smcup", "\u{1b}[?1049h"),
         ("rmcup", "\u{1b}[?1049l"),
         ("civis", "\u{1b}[?25l"),
         ("cnorm", "\u{1b}[?25h")].iter()
                                  .cloned()
                                  .collect();
}

#[derive(Debug)]
pub struct TermInfo {
    pub info: terminfo::TermInfo,
}

impl TermInfo {
    pub fn new() -> Self {
        let info = terminfo::TermInfo::from_env().unwrap_or_else(|e| {
                                                     log::warn!("terminfo unavailable ({}), using ANSI defaults", e);
                                                     terminfo::TermInfo { names: Default::default(),
                                                                          bools: Default::default(),
                                                                          numbers: Default::default(),
                                                                          strings: Default::default() }
                                                 });
        TermInfo { info }
    }

    pub fn get_string(&self, command: &str) -> Option<String> {
        match self.info.strings.get(command) {
            Some(s) => Some(String::from_utf8_lossy(s).into_owned()),
            None => ANSI_FALLBACK.get(command).map(|s| s.to_string()),
        }
    }

    pub fn key_strings(&self) -> impl Iterator<Item = (&str, &Vec<u8>)> {
        self.info.strings.iter().map(|(k, v)| (*k, v))
    }

    pub fn format(s: &str, args: &[usize]) -> String {
        let vecarg: Vec<usize> = match s.find("%i") {
            Some(_) => args.iter().map(|x| x + 1).collect(),
            None => args.to_vec(),
        };
        let mut ret: String = s.replace("%i", "");
        for (i, a) in vecarg.iter().enumerate() {
            let from = format!("%p{}%d", i + 1);
            let to = format!("{}", a);
            ret = ret.replace(from.as_str(), to.as_str());
        }
        ret
    }
}
