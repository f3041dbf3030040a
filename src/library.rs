//! Caller-owned collection of formulas.
//!
//! The UI layer keeps one `FormulaLibrary` and hands individual formulas to
//! the evaluator as plain values. Storage is up to the caller; the library
//! only converts to and from the JSON export format.

use crate::error::{FormulaError, Result};
use crate::formula::{formulas_to_json, parse_formulas, Formula};
use log::{debug, info};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormulaLibrary {
    formulas: Vec<Formula>,
}

impl FormulaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_formulas(formulas: Vec<Formula>) -> Self {
        Self { formulas }
    }

    /// Loads a library from exported JSON, skipping malformed entries.
    pub fn load_json(json: &str) -> Result<Self> {
        let formulas = parse_formulas(json)?;
        info!("Loaded {} formulas", formulas.len());
        Ok(Self { formulas })
    }

    pub fn export_json(&self) -> Result<String> {
        formulas_to_json(&self.formulas)
    }

    pub fn formulas(&self) -> &[Formula] {
        &self.formulas
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Formula> {
        self.formulas.iter().find(|formula| formula.id == id)
    }

    /// Replaces the formula with the same id in place, or appends it.
    pub fn upsert(&mut self, formula: Formula) {
        debug!("Saving formula '{}' ({})", formula.id, formula.title);
        match self.formulas.iter_mut().find(|f| f.id == formula.id) {
            Some(existing) => *existing = formula,
            None => self.formulas.push(formula),
        }
    }

    pub fn remove(&mut self, id: &str) -> Result<Formula> {
        let index = self
            .formulas
            .iter()
            .position(|formula| formula.id == id)
            .ok_or_else(|| FormulaError::NotFound { id: id.to_string() })?;
        debug!("Deleting formula '{}'", id);
        Ok(self.formulas.remove(index))
    }

    /// Appends a deep copy of formula `id` under `new_id`, titled `(Copy) <title>`.
    ///
    /// Fails with [`FormulaError::DuplicateId`] when `new_id` is already taken.
    pub fn duplicate(&mut self, id: &str, new_id: impl Into<String>) -> Result<&Formula> {
        let new_id = new_id.into();
        if self.get(&new_id).is_some() {
            return Err(FormulaError::DuplicateId { id: new_id });
        }
        let original = self
            .get(id)
            .ok_or_else(|| FormulaError::NotFound { id: id.to_string() })?;

        let copy = Formula {
            id: new_id,
            title: format!("(Copy) {}", original.title),
            ..original.clone()
        };
        debug!("Duplicating formula '{}' as '{}'", id, copy.id);

        self.formulas.push(copy);
        let index = self.formulas.len() - 1;
        Ok(&self.formulas[index])
    }

    /// Appends imported formulas as-is.
    pub fn import(&mut self, formulas: impl IntoIterator<Item = Formula>) {
        let before = self.formulas.len();
        self.formulas.extend(formulas);
        info!("Imported {} formulas", self.formulas.len() - before);
    }
}
