use std::collections::HashMap;

/// General-purpose sentiment vocabulary. Market terms below override these
/// on overlap.
const BASE_WORDS: &[(&str, i32)] = &[
    ("good", 1),
    ("great", 2),
    ("best", 2),
    ("better", 1),
    ("excellent", 2),
    ("win", 2),
    ("wins", 2),
    ("winning", 2),
    ("won", 2),
    ("victory", 2),
    ("success", 2),
    ("succeed", 2),
    ("love", 2),
    ("happy", 2),
    ("hope", 1),
    ("hopeful", 1),
    ("benefit", 1),
    ("boost", 1),
    ("support", 1),
    ("agree", 1),
    ("agreement", 1),
    ("approve", 1),
    ("approved", 1),
    ("deal", 1),
    ("peace", 2),
    ("reform", 1),
    ("safe", 1),
    ("secure", 1),
    ("calm", 1),
    ("relief", 1),
    ("breakthrough", 2),
    ("bad", -1),
    ("worse", -1),
    ("worst", -2),
    ("hate", -2),
    ("war", -2),
    ("attack", -2),
    ("attacks", -2),
    ("conflict", -1),
    ("threat", -1),
    ("threats", -1),
    ("danger", -2),
    ("dangerous", -2),
    ("damage", -1),
    ("death", -2),
    ("dead", -2),
    ("kill", -2),
    ("killed", -2),
    ("violence", -2),
    ("violent", -2),
    ("disaster", -2),
    ("chaos", -2),
    ("emergency", -1),
    ("panic", -2),
    ("fear", -1),
    ("fears", -1),
    ("anger", -1),
    ("angry", -1),
    ("protest", -1),
    ("protests", -1),
    ("sanctions", -1),
    ("strike", -1),
    ("tension", -1),
    ("tensions", -1),
    ("corrupt", -2),
    ("corruption", -2),
    ("crime", -1),
    ("problem", -1),
    ("problems", -1),
    ("trouble", -1),
    ("fail", -2),
    ("failed", -2),
    ("failure", -2),
];

/// Market-specific vocabulary; wins over the base list on overlapping terms.
const MARKET_WORDS: &[(&str, i32)] = &[
    // Strong positive market terms
    ("outperform", 2),
    ("breakthrough", 2),
    ("exceed", 2),
    ("beat", 2),
    ("surge", 2),
    ("soar", 2),
    ("rally", 2),
    ("boom", 2),
    ("robust", 2),
    ("bullish", 2),
    ("upgrade", 2),
    ("innovation", 2),
    ("stronger-than-expected", 2),
    ("recovery", 2),
    ("upside", 2),
    ("growth", 2),
    ("profitability", 2),
    ("outperformed", 2),
    ("exceeded", 2),
    ("consensus", 2),
    // Moderate positive market terms
    ("gain", 1),
    ("increase", 1),
    ("rise", 1),
    ("up", 1),
    ("higher", 1),
    ("positive", 1),
    ("profit", 1),
    ("advantage", 1),
    ("opportunity", 1),
    ("strength", 1),
    ("strong", 1),
    ("improve", 1),
    ("improved", 1),
    ("expanding", 1),
    ("expanded", 1),
    ("momentum", 1),
    ("confident", 1),
    ("confidence", 1),
    ("progress", 1),
    ("successful", 1),
    ("achieves", 1),
    ("advancing", 1),
    ("growing", 1),
    ("favorable", 1),
    ("stability", 1),
    ("stable", 1),
    ("optimistic", 1),
    ("upward", 1),
    ("promising", 1),
    ("efficiency", 1),
    ("efficient", 1),
    ("dividend", 1),
    ("innovative", 1),
    ("leading", 1),
    ("resilient", 1),
    ("resilience", 1),
    // Strong negative market terms
    ("crash", -2),
    ("collapse", -2),
    ("plummet", -2),
    ("plunge", -2),
    ("bankrupt", -2),
    ("bankruptcy", -2),
    ("default", -2),
    ("recession", -2),
    ("crisis", -2),
    ("bearish", -2),
    ("downgrade", -2),
    ("miss", -2),
    ("missed", -2),
    ("disappointing", -2),
    ("disappointment", -2),
    ("warning", -2),
    ("weaker-than-expected", -2),
    ("liquidation", -2),
    ("shortfall", -2),
    ("restructuring", -2),
    ("layoffs", -2),
    ("investigation", -2),
    ("penalty", -2),
    ("fine", -2),
    ("lawsuit", -2),
    ("litigation", -2),
    ("scandal", -2),
    ("fraud", -2),
    ("violation", -2),
    // Moderate negative market terms
    ("decline", -1),
    ("decrease", -1),
    ("lower", -1),
    ("drop", -1),
    ("fall", -1),
    ("fell", -1),
    ("down", -1),
    ("negative", -1),
    ("loss", -1),
    ("weak", -1),
    ("weakness", -1),
    ("volatile", -1),
    ("volatility", -1),
    ("concern", -1),
    ("concerned", -1),
    ("uncertainty", -1),
    ("uncertain", -1),
    ("risk", -1),
    ("risky", -1),
    ("struggle", -1),
    ("struggling", -1),
    ("pressure", -1),
    ("pressured", -1),
    ("challenge", -1),
    ("challenging", -1),
    ("slowdown", -1),
    ("slowing", -1),
    ("slower", -1),
    ("caution", -1),
    ("cautious", -1),
    ("below", -1),
    ("underperform", -1),
    ("cut", -1),
    ("cutting", -1),
    ("suspension", -1),
    ("suspended", -1),
    ("delay", -1),
    ("delayed", -1),
    ("postpone", -1),
    ("postponed", -1),
    ("dispute", -1),
    ("shortage", -1),
    ("deficit", -1),
    ("debt", -1),
    ("oversupply", -1),
    ("recall", -1),
    ("recalled", -1),
    ("regulatory", -1),
    ("regulation", -1),
    ("burden", -1),
    ("costly", -1),
    ("expenses", -1),
    ("expense", -1),
    ("expensive", -1),
];

/// Economic-indicator terms and their importance multipliers. Matched as
/// substrings of the full lowercased text, not per token, so multi-word
/// phrases like "interest rate" land.
const ECONOMIC_INDICATORS: &[(&str, f64)] = &[
    ("gdp", 2.0),
    ("inflation", 2.0),
    ("cpi", 2.0),
    ("ppi", 2.0),
    ("unemployment", 2.0),
    ("jobs", 2.0),
    ("employment", 2.0),
    ("fed", 2.0),
    ("fomc", 2.0),
    ("interest rate", 2.0),
    ("monetary policy", 2.0),
    ("fiscal policy", 2.0),
    ("trade deficit", 2.0),
    ("trade surplus", 2.0),
    ("economic growth", 2.0),
    ("economic contraction", 2.0),
    ("housing", 1.5),
    ("manufacturing", 1.5),
    ("retail sales", 1.5),
    ("consumer confidence", 1.5),
    ("business confidence", 1.5),
    ("supply chain", 1.5),
    ("tariff", 1.5),
    ("deficit", 1.5),
    ("debt", 1.5),
    ("budget", 1.5),
];

/// Immutable sentiment vocabulary handed to the scorer at construction.
/// Word weights are signed integers of magnitude 1 or 2; indicator
/// multipliers compound per matched phrase.
#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    weights: HashMap<String, i32>,
    indicators: Vec<(String, f64)>,
}

impl SentimentLexicon {
    pub fn new(words: &[(&str, i32)], indicators: &[(&str, f64)]) -> Self {
        Self {
            weights: words
                .iter()
                .map(|(w, s)| (w.to_string(), *s))
                .collect(),
            indicators: indicators
                .iter()
                .map(|(t, m)| (t.to_string(), *m))
                .collect(),
        }
    }

    pub fn weight(&self, token: &str) -> Option<i32> {
        self.weights.get(token).copied()
    }

    pub fn indicators(&self) -> impl Iterator<Item = (&str, f64)> {
        self.indicators.iter().map(|(t, m)| (t.as_str(), *m))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Default for SentimentLexicon {
    /// Base vocabulary overlaid with market terms; overlapping terms take
    /// the market weight.
    fn default() -> Self {
        let mut weights: HashMap<String, i32> = BASE_WORDS
            .iter()
            .map(|(w, s)| (w.to_string(), *s))
            .collect();
        for (w, s) in MARKET_WORDS {
            weights.insert(w.to_string(), *s);
        }
        Self {
            weights,
            indicators: ECONOMIC_INDICATORS
                .iter()
                .map(|(t, m)| (t.to_string(), *m))
                .collect(),
        }
    }
}
