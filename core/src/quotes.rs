//! Quote shown next to the welcome page logo.

use std::sync::OnceLock;

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

pub const QUOTES: [Quote; 3] = [
    Quote {
        text: "The unleashed power of the atom has changed everything save our modes of thinking and we thus drift toward unparalleled catastrophe.",
        author: "Albert Einstein",
    },
    Quote {
        text: "The history of science shows that theories are perishable. With every new truth that is revealed we get a better understanding of Nature and our conceptions and views are modified.",
        author: "Nikola Tesla",
    },
    Quote {
        text: "Nothing in life is to be feared, it is only to be understood. Now is the time to understand more, so that we may fear less.",
        author: "Marie Curie",
    },
];

/// Pick one quote uniformly at random. Returns `None` for an empty corpus.
pub fn pick_quote<'a, R: Rng + ?Sized>(rng: &mut R, corpus: &'a [Quote]) -> Option<&'a Quote> {
    if corpus.is_empty() {
        return None;
    }
    corpus.get(rng.random_range(0..corpus.len()))
}

/// Quote chosen once for the lifetime of a widget instance.
#[derive(Debug)]
pub struct SessionQuote {
    corpus: &'static [Quote],
    chosen: OnceLock<Quote>,
}

impl SessionQuote {
    pub fn new(corpus: &'static [Quote]) -> Self {
        Self {
            corpus,
            chosen: OnceLock::new(),
        }
    }

    /// First call picks; every later call returns the same quote.
    pub fn get(&self) -> Quote {
        *self.chosen.get_or_init(|| {
            let mut rng = rand::rng();
            pick_quote(&mut rng, self.corpus)
                .copied()
                .unwrap_or(QUOTES[0])
        })
    }

    pub fn is_chosen(&self) -> bool {
        self.chosen.get().is_some()
    }
}

impl Default for SessionQuote {
    fn default() -> Self {
        Self::new(&QUOTES)
    }
}
