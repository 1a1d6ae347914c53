//! Planner records kept alongside the statistics: resource links, the study
//! schedule and the user profile. They share the engine's store, clock and
//! activity feed but never touch totals or the streak.

use chrono::NaiveDate;
use uuid::Uuid;

use super::engine::StatsEngine;
use crate::activity::ActivityKind;
use crate::clock::Clock;
use crate::error::Result;
use crate::profile::UserProfile;
use crate::resource::{default_resources, NewResource, Resource};
use crate::schedule::{self, NewScheduleItem, ScheduleItem, ScheduleUpdate};
use crate::storage::{self, keys, Store};
use crate::subject::Subject;

impl<S: Store, C: Clock> StatsEngine<S, C> {
    // ── Resources ────────────────────────────────────────────────────

    pub fn resources(&self) -> Vec<Resource> {
        storage::load(self.store(), keys::RESOURCES)
    }

    /// Resources filed under `subject`; `None` selects general resources.
    pub fn resources_for(&self, subject: Option<Subject>) -> Vec<Resource> {
        self.resources()
            .into_iter()
            .filter(|r| r.subject == subject)
            .collect()
    }

    /// Save a resource link and log it to the activity feed.
    ///
    /// # Errors
    /// Returns `CoreError::Validation` for a blank title or a non-http(s) URL.
    pub fn add_resource(&self, new_resource: NewResource) -> Result<Resource> {
        new_resource.validate()?;
        let resource =
            new_resource.into_resource(Uuid::new_v4().to_string(), self.clock().now());
        let mut resources = self.resources();
        resources.push(resource.clone());
        storage::save(self.store(), keys::RESOURCES, &resources);

        self.log_activity(
            ActivityKind::ResourceAdded,
            format!("Added resource \"{}\"", resource.title),
            resource.subject,
        );
        Ok(resource)
    }

    /// Remove a resource. Returns `false` if no resource had that id.
    pub fn delete_resource(&self, id: &str) -> bool {
        let mut resources = self.resources();
        let before = resources.len();
        resources.retain(|r| r.id != id);
        if resources.len() == before {
            return false;
        }
        storage::save(self.store(), keys::RESOURCES, &resources);
        true
    }

    /// Save the starter resources if the resource list has never been
    /// written. Returns how many were added.
    ///
    /// A list the user emptied on purpose stays empty.
    pub fn seed_default_resources(&self) -> usize {
        match self.store().read(keys::RESOURCES) {
            Ok(None) => {}
            Ok(Some(_)) => return 0,
            Err(e) => {
                tracing::warn!(error = %e, "cannot inspect resources, skipping seed");
                return 0;
            }
        }
        let mut added = 0;
        for seed in default_resources() {
            match self.add_resource(seed) {
                Ok(_) => added += 1,
                Err(e) => tracing::warn!(error = %e, "skipping invalid starter resource"),
            }
        }
        tracing::debug!(added, "seeded starter resources");
        added
    }

    // ── Schedule ─────────────────────────────────────────────────────

    pub fn schedule(&self) -> Vec<ScheduleItem> {
        storage::load(self.store(), keys::SCHEDULE)
    }

    /// Items planned for `date`, earliest first.
    pub fn schedule_for(&self, date: NaiveDate) -> Vec<ScheduleItem> {
        schedule::for_date(&self.schedule(), date)
    }

    pub fn todays_schedule(&self) -> Vec<ScheduleItem> {
        self.schedule_for(self.clock().today())
    }

    /// # Errors
    /// Returns `CoreError::Validation` for a blank title or an end time not
    /// after the start time.
    pub fn add_schedule_item(&self, new_item: NewScheduleItem) -> Result<ScheduleItem> {
        new_item.validate()?;
        let item = new_item.into_item(Uuid::new_v4().to_string());
        let mut items = self.schedule();
        items.push(item.clone());
        storage::save(self.store(), keys::SCHEDULE, &items);
        Ok(item)
    }

    /// Apply `update` to the item with `id`. `Ok(None)` for an unknown id.
    ///
    /// # Errors
    /// Returns `CoreError::Validation` if the edited item would be invalid;
    /// nothing is saved in that case.
    pub fn update_schedule_item(
        &self,
        id: &str,
        update: ScheduleUpdate,
    ) -> Result<Option<ScheduleItem>> {
        let mut items = self.schedule();
        let Some(slot) = items.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };
        let updated = update.apply(slot)?;
        *slot = updated.clone();
        storage::save(self.store(), keys::SCHEDULE, &items);
        Ok(Some(updated))
    }

    pub fn delete_schedule_item(&self, id: &str) -> bool {
        let mut items = self.schedule();
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return false;
        }
        storage::save(self.store(), keys::SCHEDULE, &items);
        true
    }

    // ── Profile ──────────────────────────────────────────────────────

    pub fn profile(&self) -> Option<UserProfile> {
        storage::load(self.store(), keys::USER_PROFILE)
    }

    pub fn is_first_time(&self) -> bool {
        self.profile().is_none()
    }

    /// Create (or replace) the profile, stamping join and last-active dates.
    ///
    /// # Errors
    /// Returns `CoreError::Validation` for a blank name.
    pub fn create_profile(&self, name: &str) -> Result<UserProfile> {
        let profile = UserProfile::new(name, self.clock().now())?;
        storage::save(self.store(), keys::USER_PROFILE, &profile);
        Ok(profile)
    }

    /// Bump the last-active date of an existing profile.
    pub fn touch_profile(&self) -> Option<UserProfile> {
        let mut profile = self.profile()?;
        profile.last_active_date = self.clock().now();
        storage::save(self.store(), keys::USER_PROFILE, &profile);
        Some(profile)
    }

    /// Startup housekeeping: seed starter resources and mark the user active.
    pub fn initialize_default_data(&self) {
        self.seed_default_resources();
        self.touch_profile();
    }
}
