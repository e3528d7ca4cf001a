//! The performance-map extender.

use crate::corrections::Corrections;
use crate::curves::{Curve, CurveSet};
use crate::defaults::build_default_corrections;
use crate::error::{MapError, MapResult};
use crate::rated::RatedValues;
use pm_core::{Mode, Quantity, Variable};
use pm_table::Table;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// An incomplete performance map together with everything needed to fill it.
///
/// Wraps a [`Table`] with the operating mode, the entries to synthesize
/// along missing dimensions, the correction curves and the
/// manufacturer-value factors. Every operation returns a new map carrying
/// the whole attribute bundle forward; the caller's map is never mutated.
///
/// The usual lifecycle is: build a map from manufacturer data, configure
/// entries and factors, set the mode (which installs default corrections),
/// then call [`PerformanceMap::fillmap`] and export with
/// [`PerformanceMap::print_permap`](crate::export).
#[derive(Debug, Clone)]
pub struct PerformanceMap {
    table: Table,
    mode: Option<Mode>,
    normalized: bool,
    entries: BTreeMap<Variable, Vec<f64>>,
    corrections: Option<Corrections>,
    manval_factors: BTreeMap<Variable, f64>,
}

impl PerformanceMap {
    /// Wrap a manufacturer table.
    ///
    /// Starts with the default frequency entries `[0.2, 0.5, 1.0]` and
    /// air-flow entries `[0.0, 1.0]`, no mode and no corrections.
    pub fn new(table: Table) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(Variable::Freq, vec![0.2, 0.5, 1.0]);
        entries.insert(Variable::Afr, vec![0.0, 1.0]);
        Self {
            table,
            mode: None,
            normalized: false,
            entries,
            corrections: None,
            manval_factors: BTreeMap::new(),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn normalized(&self) -> bool {
        self.normalized
    }

    pub fn entries(&self) -> &BTreeMap<Variable, Vec<f64>> {
        &self.entries
    }

    pub fn manval_factors(&self) -> &BTreeMap<Variable, f64> {
        &self.manval_factors
    }

    pub fn corrections(&self) -> Option<&Corrections> {
        self.corrections.as_ref()
    }

    /// New map with the same attribute bundle but a different table.
    fn with_table(&self, table: Table) -> Self {
        let mut new = self.clone();
        new.table = table;
        new
    }

    fn require_mode(&self, before: &'static str) -> MapResult<Mode> {
        self.mode.ok_or(MapError::ModeNotSet { before })
    }

    fn corrections_ref(&self, before: &'static str) -> MapResult<&Corrections> {
        self.require_mode(before)?;
        self.corrections
            .as_ref()
            .ok_or(MapError::ModeNotSet { before })
    }

    /// Set the operating mode from free-form text.
    ///
    /// Relabels the table's column axis with the mode name. The first call
    /// installs the mode's default corrections (completing every curve set)
    /// and, when unset, the default manufacturer-value factors
    /// (`freq: 1, AFR: 1`, plus `Twbr: 1` for cooling). Corrections that
    /// are already present are kept and a warning is logged instead.
    pub fn set_mode(&self, text: &str) -> MapResult<Self> {
        let mode = Mode::parse(text)?;
        let mut new = self.clone();
        new.mode = Some(mode);
        new.table = new.table.with_axis_label(mode.as_str());
        match &new.corrections {
            None => {
                new.corrections = Some(build_default_corrections(mode).complete_all()?);
            }
            Some(_) => {
                warn!(
                    %mode,
                    "corrections are already set and were not overwritten, \
                     though they may need to be changed after setting a new mode"
                );
            }
        }
        if new.manval_factors.is_empty() {
            new.manval_factors.insert(Variable::Freq, 1.0);
            new.manval_factors.insert(Variable::Afr, 1.0);
            if mode == Mode::Cooling {
                new.manval_factors.insert(Variable::Twbr, 1.0);
            }
        }
        Ok(new)
    }

    /// Replace the entries along a missing dimension.
    pub fn set_entries(&self, variable: Variable, entries: Vec<f64>) -> Self {
        let mut new = self.clone();
        new.entries.insert(variable, entries);
        new
    }

    /// Replace a manufacturer-value factor.
    pub fn set_manval_factor(&self, variable: Variable, ratio: f64) -> Self {
        let mut new = self.clone();
        new.manval_factors.insert(variable, ratio);
        new
    }

    /// The correction curve set for an input variable.
    pub fn get_correction(&self, input: Variable) -> MapResult<&CurveSet> {
        self.corrections_ref("getting correction")?.get(input)
    }

    /// A single correction curve.
    pub fn get_correction_curve(&self, input: Variable, output: Quantity) -> MapResult<&Curve> {
        self.get_correction(input)?
            .get(output)
            .ok_or(MapError::MissingCorrectionCurve { input, output })
    }

    /// The sensible-heat-ratio curve.
    pub fn shr_correction(&self) -> MapResult<&Curve> {
        self.corrections_ref("getting correction")?
            .shr
            .as_ref()
            .ok_or(MapError::MissingShrCorrection)
    }

    /// Replace one correction curve, returning a new map.
    pub fn set_correction(
        &self,
        input: Variable,
        output: Quantity,
        curve: Curve,
    ) -> MapResult<Self> {
        let mut new = self.clone();
        new.set_correction_in_place(input, output, curve)?;
        Ok(new)
    }

    /// In-place variant of [`PerformanceMap::set_correction`].
    ///
    /// Validates before mutating, so a failed call leaves the map intact.
    pub fn set_correction_in_place(
        &mut self,
        input: Variable,
        output: Quantity,
        curve: Curve,
    ) -> MapResult<()> {
        self.corrections_ref("setting new correction")?;
        let corrections = self
            .corrections
            .as_ref()
            .ok_or(MapError::ModeNotSet {
                before: "setting new correction",
            })?;
        let mut curves = corrections.get(input)?.clone();
        curves.set(output, curve)?;
        let mut corrections = corrections.clone();
        corrections.set(input, curves)?;
        self.corrections = Some(corrections);
        Ok(())
    }

    /// Replace every correction curve of an input variable.
    ///
    /// The replacement set is completed right away, so a missing trio curve
    /// is derived from the two that were supplied.
    pub fn set_corrections(&self, input: Variable, curves: CurveSet) -> MapResult<Self> {
        let corrections = self.corrections_ref("setting new corrections")?;
        let mut corrections = corrections.clone();
        corrections.set(input, curves.complete(input)?)?;
        let mut new = self.clone();
        new.corrections = Some(corrections);
        Ok(new)
    }

    /// Replace the sensible-heat-ratio curve.
    pub fn set_shr_correction(&self, curve: Curve) -> MapResult<Self> {
        let corrections = self.corrections_ref("setting new corrections")?;
        let mut corrections = corrections.clone();
        corrections.shr = Some(curve);
        let mut new = self.clone();
        new.corrections = Some(corrections);
        Ok(new)
    }

    /// Fill in the missing power/capacity/COP column from the other two.
    pub fn complete_columns(&self) -> MapResult<Self> {
        Ok(self.with_table(complete_trio_columns(&self.table)?))
    }

    /// Normalize output values by their rated values.
    ///
    /// With `None` this is a no-op copy. Otherwise the column sets of the
    /// table and the rated values are reconciled first: a side missing
    /// exactly one trio member gets it derived; any other difference is an
    /// error naming the unmatched columns. Each column is then divided by
    /// its rated value and the normalized flag is set.
    ///
    /// # Errors
    /// [`MapError::AlreadyNormalized`] on a second call,
    /// [`MapError::ModeNotSet`] without a mode, and
    /// [`MapError::ColumnMismatch`] on irreconcilable column sets.
    pub fn normalize(&self, rated: Option<&RatedValues>) -> MapResult<Self> {
        if self.normalized {
            return Err(MapError::AlreadyNormalized);
        }
        self.require_mode("normalizing")?;
        let Some(rated) = rated else {
            return Ok(self.clone());
        };

        let mut table = self.table.clone();
        let mut rated = *rated;
        let trio_missing_from_table = Quantity::TRIO
            .iter()
            .filter(|q| !table.has_column(**q))
            .count();
        if trio_missing_from_table == 1 {
            table = complete_trio_columns(&table)?;
        }
        if rated.present().len() == 2 {
            rated = rated.complete()?;
        }

        let mut table_only = Vec::new();
        let mut pairs = Vec::new();
        for &quantity in table.columns() {
            match rated.get(quantity) {
                Some(value) => pairs.push((quantity, value)),
                None => table_only.push(quantity.to_string()),
            }
        }
        let rated_only: Vec<String> = rated
            .present()
            .into_iter()
            .filter(|q| !table.has_column(*q))
            .map(|q| q.to_string())
            .collect();
        if !table_only.is_empty() || !rated_only.is_empty() {
            return Err(MapError::ColumnMismatch {
                table_only,
                other_only: rated_only,
            });
        }

        for (quantity, value) in pairs {
            table = table.scale_column(quantity, 1.0 / value)?;
        }
        let mut new = self.with_table(table);
        new.normalized = true;
        Ok(new)
    }

    /// Check that the table columns exactly match a curve set.
    fn check_columns(&self, curves: &CurveSet) -> MapResult<()> {
        let present = curves.present();
        let table_only: Vec<String> = self
            .table
            .columns()
            .iter()
            .filter(|q| !present.contains(q))
            .map(|q| q.to_string())
            .collect();
        let other_only: Vec<String> = present
            .iter()
            .filter(|q| !self.table.has_column(**q))
            .map(|q| q.to_string())
            .collect();
        if table_only.is_empty() && other_only.is_empty() {
            Ok(())
        } else {
            Err(MapError::ColumnMismatch {
                table_only,
                other_only,
            })
        }
    }

    /// Scale every output column to the conditions at `entry`.
    ///
    /// Each column `q` is multiplied by `curve_q(entry) / curve_q(manval)`;
    /// dividing by the manufacturer-value anchor makes the original data
    /// come back unchanged when `entry` equals the anchor. Curves are
    /// assumed to be well-defined and non-zero at the anchor.
    pub fn correct(&self, curves: &CurveSet, entry: f64, manval: f64) -> MapResult<Self> {
        self.check_columns(curves)?;
        let mut table = self.table.clone();
        for quantity in table.columns().to_vec() {
            // check_columns guarantees a curve per column
            if let Some(curve) = curves.get(quantity) {
                table = table.scale_column(quantity, curve(entry) / curve(manval))?;
            }
        }
        Ok(self.with_table(table))
    }

    /// Extend the map along a dimension it does not have yet.
    ///
    /// Replays [`PerformanceMap::correct`] at every entry and stacks the
    /// results under `variable` as the new outermost index level, anchored
    /// at the variable's manufacturer-value factor.
    pub fn extend(
        &self,
        curves: &CurveSet,
        entries: &[f64],
        variable: Variable,
    ) -> MapResult<Self> {
        self.check_columns(curves)?;
        let manval = *self
            .manval_factors
            .get(&variable)
            .ok_or(MapError::MissingManvalFactor { input: variable })?;
        let mut blocks = Vec::with_capacity(entries.len());
        for &entry in entries {
            blocks.push(self.correct(curves, entry, manval)?.into_table());
        }
        let table = Table::concat_new_level(variable, entries, &blocks)?;
        Ok(self.with_table(table))
    }

    fn configured_entries(&self, variable: Variable) -> MapResult<Vec<f64>> {
        self.entries
            .get(&variable)
            .cloned()
            .ok_or(MapError::MissingEntries { input: variable })
    }

    /// Fill the whole map: complete the trio column, extend along `freq`
    /// and `AFR`, apply the per-mode finishing steps and optionally
    /// normalize.
    ///
    /// Heating maps come out indexed by `[Tdbr, Tdbo, AFR, freq]` with
    /// columns `[power, capacity]`. Cooling maps get a fresh `Twbr` axis,
    /// the capacity split into sensible and latent parts via the SHR curve,
    /// and come out indexed by `[Tdbr, Twbr, Tdbo, AFR, freq]` with columns
    /// `[power, sensible_capacity, latent_capacity]`.
    pub fn fillmap(&self, norm: Option<&RatedValues>) -> MapResult<Self> {
        let mode = self.require_mode("filling the performance map")?;
        if norm.is_some() && self.normalized {
            return Err(MapError::AlreadyNormalized);
        }

        let completed = self.complete_columns()?;
        let freq_curves = completed.get_correction(Variable::Freq)?.clone();
        let freq_entries = completed.configured_entries(Variable::Freq)?;
        debug!(entries = freq_entries.len(), "extending along freq");
        let with_freq = completed.extend(&freq_curves, &freq_entries, Variable::Freq)?;

        let afr_curves = with_freq.get_correction(Variable::Afr)?.clone();
        let afr_entries = with_freq.configured_entries(Variable::Afr)?;
        debug!(entries = afr_entries.len(), "extending along AFR");
        let with_afr = with_freq.extend(&afr_curves, &afr_entries, Variable::Afr)?;

        match mode {
            Mode::Heating => {
                let table = with_afr
                    .table
                    .reorder_levels(&[
                        Variable::Tdbr,
                        Variable::Tdbo,
                        Variable::Afr,
                        Variable::Freq,
                    ])?
                    .sorted_by_index();
                let normalized = self.with_table(table).normalize(norm)?;
                let table = normalized
                    .table
                    .select_columns(&[Quantity::Power, Quantity::Capacity])?;
                Ok(normalized.with_table(table))
            }
            Mode::Cooling => {
                // The manufacturer table ties Twbr to Tdbr, so dropping the
                // level collapses nothing real; a fresh Twbr axis is then
                // synthesized from the wet-bulb correction curves.
                let twbr_values = with_afr.table.unique_level_values(Variable::Twbr)?;
                let without_twbr = with_afr.table.drop_level(Variable::Twbr)?;
                let twbr_curves = with_afr.get_correction(Variable::Twbr)?.clone();
                debug!(entries = twbr_values.len(), "re-extending along Twbr");
                let with_twbr = self.with_table(without_twbr).extend(
                    &twbr_curves,
                    &twbr_values,
                    Variable::Twbr,
                )?;

                let normalized = with_twbr.normalize(norm)?;
                let shr = normalized.shr_correction()?.clone();
                let tdb = normalized.table.level_values(Variable::Tdbr)?;
                let twb = normalized.table.level_values(Variable::Twbr)?;
                let capacity = normalized.table.column(Quantity::Capacity)?.to_vec();
                let sensible: Vec<f64> = capacity
                    .iter()
                    .zip(tdb.iter().zip(&twb))
                    .map(|(cap, (tdb, twb))| cap * shr(tdb - twb))
                    .collect();
                let latent: Vec<f64> = capacity
                    .iter()
                    .zip(&sensible)
                    .map(|(cap, sens)| cap - sens)
                    .collect();

                let table = normalized
                    .table
                    .with_column(Quantity::SensibleCapacity, sensible)?
                    .with_column(Quantity::LatentCapacity, latent)?
                    .without_column(Quantity::Capacity)?
                    .reorder_levels(&[
                        Variable::Tdbr,
                        Variable::Twbr,
                        Variable::Tdbo,
                        Variable::Afr,
                        Variable::Freq,
                    ])?
                    .sorted_by_index()
                    .select_columns(&[
                        Quantity::Power,
                        Quantity::SensibleCapacity,
                        Quantity::LatentCapacity,
                    ])?;
                Ok(normalized.with_table(table))
            }
        }
    }
}

/// Fill in a missing trio column from the two that are present.
///
/// Tables with all three columns pass through unchanged; anything other
/// than exactly one missing member is an error.
fn complete_trio_columns(table: &Table) -> MapResult<Table> {
    let present: Vec<Quantity> = Quantity::TRIO
        .iter()
        .copied()
        .filter(|q| table.has_column(*q))
        .collect();
    if present.len() == 3 {
        return Ok(table.clone());
    }
    if present.len() != 2 {
        return Err(MapError::TrioIncomplete {
            what: "table columns".to_string(),
            present: present.len(),
        });
    }
    let missing = Quantity::TRIO
        .iter()
        .copied()
        .find(|q| !present.contains(q))
        .ok_or(MapError::TrioIncomplete {
            what: "table columns".to_string(),
            present: present.len(),
        })?;
    let values = match missing {
        Quantity::Power => zip_columns(table, Quantity::Capacity, Quantity::Cop, |c, k| c / k)?,
        Quantity::Capacity => zip_columns(table, Quantity::Power, Quantity::Cop, |p, k| p * k)?,
        Quantity::Cop => zip_columns(table, Quantity::Capacity, Quantity::Power, |c, p| c / p)?,
        other => return Err(MapError::NotACorrectionOutput { output: other }),
    };
    Ok(table.with_column(missing, values)?)
}

fn zip_columns(
    table: &Table,
    a: Quantity,
    b: Quantity,
    f: impl Fn(f64, f64) -> f64,
) -> MapResult<Vec<f64>> {
    let a = table.column(a)?;
    let b = table.column(b)?;
    Ok(a.iter().zip(b).map(|(x, y)| f(*x, *y)).collect())
}
