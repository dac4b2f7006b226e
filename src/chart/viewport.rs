// ============================================================================
// Viewport - Fenêtre de zoom du graphique des prix
// ============================================================================
// Le graphique des prix n'a pas de souris : le zoom se fait au clavier.
// Chaque changement produit un ViewportEvent, comme le ferait un graphique
// interactif qui publie ses nouvelles bornes d'axe X.
//
// CONCEPT : Fenêtre d'indices sur les dates distinctes
// - window = None : pas de zoom (toute la plage)
// - window = Some((lo, hi)) : indices inclusifs dans `dates`
// ============================================================================

use chrono::NaiveDate;

use crate::chart::controller::ViewportEvent;
use crate::models::DATE_FORMAT;

/// Fenêtre visible du graphique des prix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Dates distinctes triées des tickers affichés
    dates: Vec<NaiveDate>,

    /// Indices inclusifs de la fenêtre zoomée
    window: Option<(usize, usize)>,
}

impl Viewport {
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self { dates, window: None }
    }

    /// Remplace l'axe des dates (changement de tickers)
    ///
    /// Le zoom courant est conservé en dates quand il recouvre encore
    /// des données, sinon la fenêtre revient à toute la plage.
    pub fn set_dates(&mut self, dates: Vec<NaiveDate>) {
        let previous = self.visible_range();
        self.dates = dates;
        self.window = None;

        if let Some((start, end)) = previous {
            let lo = self.dates.partition_point(|d| *d < start);
            let hi = self.dates.partition_point(|d| *d <= end);
            if lo < hi && hi - lo < self.dates.len() {
                self.window = Some((lo, hi - 1));
            }
        }
    }

    pub fn is_zoomed(&self) -> bool {
        self.window.is_some()
    }

    /// Plage de dates zoomée, None sans zoom
    pub fn visible_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let (lo, hi) = self.window?;
        Some((*self.dates.get(lo)?, *self.dates.get(hi)?))
    }

    /// Indices courants (fenêtre ou toute la plage), None si aucune date
    fn current(&self) -> Option<(usize, usize)> {
        if self.dates.is_empty() {
            return None;
        }
        Some(self.window.unwrap_or((0, self.dates.len() - 1)))
    }

    /// Divise la fenêtre par deux autour de son centre
    pub fn zoom_in(&mut self) -> bool {
        let Some((lo, hi)) = self.current() else {
            return false;
        };
        let len = hi - lo + 1;
        if len <= 1 {
            return false;
        }

        let new_len = (len / 2).max(1);
        let center = lo + (len - 1) / 2;
        let new_lo = center.saturating_sub((new_len - 1) / 2).max(lo);
        self.window = Some((new_lo, new_lo + new_len - 1));
        true
    }

    /// Double la fenêtre ; revient à toute la plage quand elle la couvre
    pub fn zoom_out(&mut self) -> bool {
        let (Some((lo, hi)), true) = (self.current(), self.is_zoomed()) else {
            return false;
        };
        let total = self.dates.len();
        let len = hi - lo + 1;
        let new_len = len * 2;

        if new_len >= total {
            self.window = None;
            return true;
        }

        let center = lo + (len - 1) / 2;
        let mut new_lo = center.saturating_sub((new_len - 1) / 2);
        let mut new_hi = new_lo + new_len - 1;
        if new_hi >= total {
            new_hi = total - 1;
            new_lo = new_hi + 1 - new_len;
        }
        self.window = Some((new_lo, new_hi));
        true
    }

    /// Décale la fenêtre vers le passé d'un quart de sa largeur
    pub fn pan_left(&mut self) -> bool {
        let Some((lo, hi)) = self.window else {
            return false;
        };
        if lo == 0 {
            return false;
        }
        let shift = pan_step(lo, hi).min(lo);
        self.window = Some((lo - shift, hi - shift));
        true
    }

    /// Décale la fenêtre vers le futur d'un quart de sa largeur
    pub fn pan_right(&mut self) -> bool {
        let Some((lo, hi)) = self.window else {
            return false;
        };
        let last = self.dates.len().saturating_sub(1);
        if hi >= last {
            return false;
        }
        let shift = pan_step(lo, hi).min(last - hi);
        self.window = Some((lo + shift, hi + shift));
        true
    }

    /// Autoscale : retour à toute la plage
    pub fn reset(&mut self) -> bool {
        self.window.take().is_some()
    }

    /// Événement publié pour la fenêtre courante
    pub fn range_event(&self) -> ViewportEvent {
        ViewportEvent::from(self.visible_range().map(|(start, end)| {
            (
                start.format(DATE_FORMAT).to_string(),
                end.format(DATE_FORMAT).to_string(),
            )
        }))
    }
}

fn pan_step(lo: usize, hi: usize) -> usize {
    ((hi - lo + 1) / 4).max(1)
}

// ============================================================================
// Tests unitaires
// ============================================================================
