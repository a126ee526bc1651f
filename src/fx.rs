use async_trait::async_trait;
use serde::Deserialize;

use crate::error::SourceError;

/// The four exchange mechanisms tracked on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FxKind {
    Official,
    Mep,
    Ccl,
    Blue,
}

impl FxKind {
    pub const ALL: [FxKind; 4] = [FxKind::Official, FxKind::Mep, FxKind::Ccl, FxKind::Blue];

    pub fn label(&self) -> &'static str {
        match self {
            FxKind::Official => "Oficial",
            FxKind::Mep => "MEP",
            FxKind::Ccl => "CCL",
            FxKind::Blue => "Blue",
        }
    }

    /// Case-insensitive match against the upstream's naming.
    fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        match self {
            FxKind::Official => name == "oficial",
            FxKind::Mep => name == "mep",
            FxKind::Ccl => name.starts_with("contadoconliqui"),
            FxKind::Blue => name == "blue",
        }
    }
}

/// Buy/sell pair for one mechanism. Both sides are independently optional; a
/// source may publish one without the other.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FxQuote {
    pub buy: Option<f64>,
    pub sell: Option<f64>,
}

impl FxQuote {
    pub fn is_empty(&self) -> bool {
        self.buy.is_none() && self.sell.is_none()
    }
}

/// One element of the upstream quote array. The provider publishes both a
/// display name (`nombre`) and a slug (`casa`); either may carry the match.
#[derive(Debug, Clone, Deserialize)]
pub struct FxEntry {
    pub nombre: Option<String>,
    pub casa: Option<String>,
    pub compra: Option<f64>,
    pub venta: Option<f64>,
}

impl FxEntry {
    fn matches(&self, kind: FxKind) -> bool {
        [self.nombre.as_deref(), self.casa.as_deref()]
            .into_iter()
            .flatten()
            .any(|name| kind.matches(name))
    }
}

/// Normalized quotes for all four mechanisms. A kind the upstream did not
/// supply holds an empty quote, never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FxBoard {
    pub official: FxQuote,
    pub mep: FxQuote,
    pub ccl: FxQuote,
    pub blue: FxQuote,
}

impl FxBoard {
    pub fn from_entries(entries: &[FxEntry]) -> Self {
        let pick = |kind: FxKind| {
            entries
                .iter()
                .find(|e| e.matches(kind))
                .map(|e| FxQuote {
                    buy: e.compra,
                    sell: e.venta,
                })
                .unwrap_or_default()
        };
        FxBoard {
            official: pick(FxKind::Official),
            mep: pick(FxKind::Mep),
            ccl: pick(FxKind::Ccl),
            blue: pick(FxKind::Blue),
        }
    }

    pub fn quote(&self, kind: FxKind) -> &FxQuote {
        match kind {
            FxKind::Official => &self.official,
            FxKind::Mep => &self.mep,
            FxKind::Ccl => &self.ccl,
            FxKind::Blue => &self.blue,
        }
    }
}

#[async_trait]
pub trait FxRateProvider: Send + Sync {
    async fn fetch_board(&self) -> Result<FxBoard, SourceError>;
}
