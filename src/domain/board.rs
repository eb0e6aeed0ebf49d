use std::collections::HashMap;

use crate::domain::{BoardError, Card, Stage};

/// The full board at a point in time: ordered stages, one ordered card-id
/// lane per stage, and the card map.
///
/// Invariant: every card id appears in exactly one lane, and that lane's
/// stage id equals the card's `stage_id`. Two boards exist while a drag is
/// active: the server snapshot held by the store and the working copy
/// mutated by the reconciler. When no drag is active they are equal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    stages: Vec<Stage>,
    lanes: HashMap<String, Vec<String>>,
    cards: HashMap<String, Card>,
}

impl Board {
    /// Build a board from remote data. Stages are ordered by `position`;
    /// lanes keep the deal order the server returned, which reflects the
    /// active sort criterion. Deals referencing an unknown stage are
    /// dropped rather than parked in an arbitrary lane.
    pub fn from_parts(mut stages: Vec<Stage>, deals: Vec<Card>) -> Self {
        stages.sort_by_key(|s| s.position);

        let mut lanes: HashMap<String, Vec<String>> = stages
            .iter()
            .map(|s| (s.id.clone(), Vec::new()))
            .collect();
        let mut cards = HashMap::with_capacity(deals.len());

        for deal in deals {
            match lanes.get_mut(&deal.stage_id) {
                Some(lane) => {
                    lane.push(deal.id.clone());
                    cards.insert(deal.id.clone(), deal);
                }
                None => {
                    tracing::warn!(
                        card_id = deal.id.as_str(),
                        stage_id = deal.stage_id.as_str(),
                        "deal references unknown stage, dropping from board"
                    );
                }
            }
        }

        Self { stages, lanes, cards }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage(&self, stage_id: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == stage_id)
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.cards.get(card_id)
    }

    pub fn lane(&self, stage_id: &str) -> Option<&[String]> {
        self.lanes.get(stage_id).map(Vec::as_slice)
    }

    pub fn lane_len(&self, stage_id: &str) -> usize {
        self.lanes.get(stage_id).map(Vec::len).unwrap_or(0)
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Locate a card: the stage whose lane contains it, and its index there.
    pub fn locate(&self, card_id: &str) -> Option<(&str, usize)> {
        let card = self.cards.get(card_id)?;
        let lane = self.lanes.get(&card.stage_id)?;
        let index = lane.iter().position(|id| id == card_id)?;
        Some((card.stage_id.as_str(), index))
    }

    /// Move a card to `stage_id`, inserting at `index` after the card has
    /// been pulled out of its current lane (the index is clamped to the
    /// target lane's length). Returns `Ok(false)` without mutating when the
    /// card already sits at the requested placement.
    pub fn move_card_to(
        &mut self,
        card_id: &str,
        stage_id: &str,
        index: usize,
    ) -> Result<bool, BoardError> {
        let (current_stage, current_index) = self
            .locate(card_id)
            .map(|(s, i)| (s.to_string(), i))
            .ok_or_else(|| BoardError::CardNotFound(card_id.into()))?;

        if !self.lanes.contains_key(stage_id) {
            return Err(BoardError::StageNotFound(stage_id.into()));
        }

        if current_stage == stage_id {
            let lane_len = self.lane_len(&current_stage);
            // index is interpreted post-removal, so the last slot is len - 1
            let at = index.min(lane_len.saturating_sub(1));
            if at == current_index {
                return Ok(false);
            }
        }

        if let Some(lane) = self.lanes.get_mut(&current_stage) {
            lane.retain(|id| id != card_id);
        }
        let target = self
            .lanes
            .get_mut(stage_id)
            .ok_or_else(|| BoardError::StageNotFound(stage_id.into()))?;
        let at = index.min(target.len());
        target.insert(at, card_id.to_string());

        if let Some(card) = self.cards.get_mut(card_id) {
            card.stage_id = stage_id.to_string();
        }

        Ok(true)
    }

    /// Check the partitioned-list invariant. Used by tests after every
    /// mutation sequence; cheap enough to run on real boards too.
    pub fn validate(&self) -> Result<(), BoardError> {
        let mut seen: HashMap<&str, &str> = HashMap::new();

        for (stage_id, lane) in &self.lanes {
            if self.stage(stage_id).is_none() {
                return Err(BoardError::Inconsistent(format!(
                    "lane for unknown stage {stage_id}"
                )));
            }
            for card_id in lane {
                if let Some(previous) = seen.insert(card_id, stage_id) {
                    return Err(BoardError::Inconsistent(format!(
                        "card {card_id} appears in both {previous} and {stage_id}"
                    )));
                }
                match self.cards.get(card_id) {
                    Some(card) if card.stage_id == *stage_id => {}
                    Some(card) => {
                        return Err(BoardError::Inconsistent(format!(
                            "card {card_id} is in lane {stage_id} but claims stage {}",
                            card.stage_id
                        )));
                    }
                    None => {
                        return Err(BoardError::Inconsistent(format!(
                            "lane {stage_id} references unknown card {card_id}"
                        )));
                    }
                }
            }
        }

        if seen.len() != self.cards.len() {
            return Err(BoardError::Inconsistent(format!(
                "{} cards mapped but {} placed in lanes",
                self.cards.len(),
                seen.len()
            )));
        }

        Ok(())
    }
}
