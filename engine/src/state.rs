//! Session state
//!
//! A [`Session`] owns every piece of mutable state for the single local
//! user: the bounded histories, the daily intake accumulator, the profiles
//! and immunization progress. It reads the store once when opened and
//! writes a key through after each change.

use crate::aggregates::NutritionTotals;
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::repositories::{DocumentRepository, HistoryRepository};
use crate::services::immunization::ImmunizationProgress;
use crate::storage::{keys, open_store, KeyValueStore};
use health_metrics_shared::history::HistorySequence;
use health_metrics_shared::models::{
    BpRecord, GrowthRecord, MealRecord, SleepProfile, SleepRecord, UserProfile,
};
use tracing::{info, warn};

pub struct Session {
    store: Box<dyn KeyValueStore>,
    config: EngineConfig,
    pub(crate) sleep: HistorySequence<SleepRecord>,
    pub(crate) sleep_profile: SleepProfile,
    pub(crate) meals: HistorySequence<MealRecord>,
    pub(crate) intake: NutritionTotals,
    pub(crate) nutrition_profile: Option<UserProfile>,
    pub(crate) bp: HistorySequence<BpRecord>,
    pub(crate) growth: HistorySequence<GrowthRecord>,
    pub(crate) immunization: ImmunizationProgress,
}

impl Session {
    /// Open a session over an existing store
    pub fn open(store: Box<dyn KeyValueStore>, config: EngineConfig) -> EngineResult<Self> {
        let caps = &config.history;
        let store_ref = store.as_ref();

        let session = Self {
            sleep: HistoryRepository::load(store_ref, keys::SLEEP_HISTORY, caps.sleep_cap)?,
            sleep_profile: DocumentRepository::load_or_default(store_ref, keys::SLEEP_PROFILE)?,
            meals: HistoryRepository::load(store_ref, keys::MEAL_HISTORY, caps.meal_cap)?,
            intake: DocumentRepository::load_or_default(store_ref, keys::DAILY_INTAKE)?,
            nutrition_profile: DocumentRepository::load::<Option<UserProfile>>(
                store_ref,
                keys::NUTRITION_PROFILE,
            )?
            .flatten(),
            bp: HistoryRepository::load(store_ref, keys::BP_HISTORY, caps.bp_cap)?,
            growth: HistoryRepository::load(store_ref, keys::GROWTH_HISTORY, caps.growth_cap)?,
            immunization: DocumentRepository::load_or_default(store_ref, keys::IMMUNIZATION_PROGRESS)?,
            store,
            config,
        };

        info!(
            sleep_entries = session.sleep.len(),
            meal_entries = session.meals.len(),
            bp_readings = session.bp.len(),
            growth_measurements = session.growth.len(),
            "Session opened"
        );
        Ok(session)
    }

    /// Open a session over the store selected by configuration
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        let store = open_store(&config.storage)?;
        Self::open(store, config)
    }

    /// In-memory session with default configuration
    pub fn in_memory() -> EngineResult<Self> {
        Self::from_config(EngineConfig::default())
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn sleep_history(&self) -> &HistorySequence<SleepRecord> {
        &self.sleep
    }

    #[inline]
    pub fn sleep_profile(&self) -> &SleepProfile {
        &self.sleep_profile
    }

    #[inline]
    pub fn meal_history(&self) -> &HistorySequence<MealRecord> {
        &self.meals
    }

    #[inline]
    pub fn daily_intake(&self) -> &NutritionTotals {
        &self.intake
    }

    #[inline]
    pub fn nutrition_profile(&self) -> Option<&UserProfile> {
        self.nutrition_profile.as_ref()
    }

    #[inline]
    pub fn bp_history(&self) -> &HistorySequence<BpRecord> {
        &self.bp
    }

    #[inline]
    pub fn growth_history(&self) -> &HistorySequence<GrowthRecord> {
        &self.growth
    }

    #[inline]
    pub fn immunization(&self) -> &ImmunizationProgress {
        &self.immunization
    }

    // ========================================================================
    // Write-through
    // ========================================================================
    //
    // Each commit saves the next value first and adopts it only once the
    // store accepts it, so a failed write leaves the session unchanged.

    pub(crate) fn commit_sleep(&mut self, next: HistorySequence<SleepRecord>) -> EngineResult<()> {
        HistoryRepository::save(self.store.as_mut(), keys::SLEEP_HISTORY, &next)?;
        self.sleep = next;
        Ok(())
    }

    pub(crate) fn commit_sleep_profile(&mut self, next: SleepProfile) -> EngineResult<()> {
        DocumentRepository::save(self.store.as_mut(), keys::SLEEP_PROFILE, &next)?;
        self.sleep_profile = next;
        Ok(())
    }

    pub(crate) fn commit_intake(&mut self, next: NutritionTotals) -> EngineResult<()> {
        DocumentRepository::save(self.store.as_mut(), keys::DAILY_INTAKE, &next)?;
        self.intake = next;
        Ok(())
    }

    /// Save the meal history and the intake it implies as one change.
    ///
    /// If the intake write fails the previous meal history is written back.
    pub(crate) fn commit_meals(
        &mut self,
        meals: HistorySequence<MealRecord>,
        intake: NutritionTotals,
    ) -> EngineResult<()> {
        HistoryRepository::save(self.store.as_mut(), keys::MEAL_HISTORY, &meals)?;
        if let Err(err) = DocumentRepository::save(self.store.as_mut(), keys::DAILY_INTAKE, &intake) {
            if let Err(restore) =
                HistoryRepository::save(self.store.as_mut(), keys::MEAL_HISTORY, &self.meals)
            {
                warn!(error = %restore, "Failed to restore meal history");
            }
            return Err(err);
        }
        self.meals = meals;
        self.intake = intake;
        Ok(())
    }

    pub(crate) fn commit_nutrition_profile(&mut self, next: UserProfile) -> EngineResult<()> {
        let next = Some(next);
        DocumentRepository::save(self.store.as_mut(), keys::NUTRITION_PROFILE, &next)?;
        self.nutrition_profile = next;
        Ok(())
    }

    pub(crate) fn commit_bp(&mut self, next: HistorySequence<BpRecord>) -> EngineResult<()> {
        HistoryRepository::save(self.store.as_mut(), keys::BP_HISTORY, &next)?;
        self.bp = next;
        Ok(())
    }

    pub(crate) fn commit_growth(&mut self, next: HistorySequence<GrowthRecord>) -> EngineResult<()> {
        HistoryRepository::save(self.store.as_mut(), keys::GROWTH_HISTORY, &next)?;
        self.growth = next;
        Ok(())
    }

    pub(crate) fn commit_immunization(&mut self, next: ImmunizationProgress) -> EngineResult<()> {
        DocumentRepository::save(self.store.as_mut(), keys::IMMUNIZATION_PROGRESS, &next)?;
        self.immunization = next;
        Ok(())
    }

    /// Give the store back, e.g. to reopen a session over the same data
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }
}
