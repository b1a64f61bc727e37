use crate::creature::{Creature, CreatureId};
use crate::errors::ValidationError;

/// Maximum number of creatures on one roster.
pub const ROSTER_CAPACITY: usize = 6;

/// An ordered team of up to six creatures. The creature at position 0 is the
/// active one; insertion order is battle order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    name: String,
    members: Vec<Creature>,
}

impl Roster {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::with_capacity(ROSTER_CAPACITY),
        }
    }

    /// Build a roster from a list of creatures, failing if there are too many.
    pub fn with_creatures(
        name: impl Into<String>,
        creatures: Vec<Creature>,
    ) -> Result<Self, ValidationError> {
        let mut roster = Self::new(name);
        roster.replace_all(creatures)?;
        Ok(roster)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= ROSTER_CAPACITY
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        self.members.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Creature> {
        self.members.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Creature> {
        self.members.get_mut(index)
    }

    /// Get the currently active creature
    pub fn active(&self) -> Option<&Creature> {
        self.members.first()
    }

    /// Get the currently active creature mutably
    pub fn active_mut(&mut self) -> Option<&mut Creature> {
        self.members.first_mut()
    }

    pub fn position_of(&self, id: CreatureId) -> Option<usize> {
        self.members.iter().position(|creature| creature.id() == id)
    }

    /// Append a creature to the end of the roster.
    pub fn add_creature(&mut self, creature: Creature) -> Result<(), ValidationError> {
        if self.is_full() {
            return Err(ValidationError::RosterFull {
                capacity: ROSTER_CAPACITY,
            });
        }
        if self.position_of(creature.id()).is_some() {
            return Err(ValidationError::DuplicateCreature(
                creature.name().to_string(),
            ));
        }
        self.members.push(creature);
        Ok(())
    }

    /// Remove a creature by identity, returning it.
    pub fn remove_creature(&mut self, id: CreatureId) -> Result<Creature, ValidationError> {
        let index = self
            .position_of(id)
            .ok_or(ValidationError::CreatureNotInRoster)?;
        Ok(self.members.remove(index))
    }

    /// Make the creature at `index` active by swapping it with position 0.
    /// The previously active creature takes the vacated index.
    pub fn switch_active(&mut self, index: usize) -> Result<(), ValidationError> {
        if index >= self.members.len() {
            return Err(ValidationError::InvalidIndex(index));
        }
        self.members.swap(0, index);
        Ok(())
    }

    /// Exchange the positions of two members, identified by identity.
    pub fn swap_positions(&mut self, a: CreatureId, b: CreatureId) -> Result<(), ValidationError> {
        let first = self
            .position_of(a)
            .ok_or(ValidationError::CreatureNotInRoster)?;
        let second = self
            .position_of(b)
            .ok_or(ValidationError::CreatureNotInRoster)?;
        self.members.swap(first, second);
        Ok(())
    }

    /// Clear and repopulate the roster in one step. On error the roster is untouched.
    pub fn replace_all(&mut self, creatures: Vec<Creature>) -> Result<(), ValidationError> {
        if creatures.len() > ROSTER_CAPACITY {
            return Err(ValidationError::TooManyCreatures {
                count: creatures.len(),
                capacity: ROSTER_CAPACITY,
            });
        }
        for (index, creature) in creatures.iter().enumerate() {
            if creatures[..index].iter().any(|other| other.id() == creature.id()) {
                return Err(ValidationError::DuplicateCreature(
                    creature.name().to_string(),
                ));
            }
        }
        self.members = creatures;
        Ok(())
    }

    pub fn has_living(&self) -> bool {
        self.members.iter().any(|creature| !creature.is_fainted())
    }

    pub fn living_count(&self) -> usize {
        self.members
            .iter()
            .filter(|creature| !creature.is_fainted())
            .count()
    }

    /// Indices of every member still able to battle, in roster order.
    pub fn living_indices(&self) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, creature)| !creature.is_fainted())
            .map(|(index, _)| index)
            .collect()
    }

    /// First living member in list order, if any.
    pub fn next_living_index(&self) -> Option<usize> {
        self.members.iter().position(|creature| !creature.is_fainted())
    }

    pub fn into_creatures(self) -> Vec<Creature> {
        self.members
    }
}
