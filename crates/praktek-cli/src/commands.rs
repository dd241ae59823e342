//! Command dispatch: one core operation per invocation.

use anyhow::{anyhow, Context, Result};
use praktek_core::db::load;
use praktek_core::{
    BookingEngine, ClinicStats, Clock, Directory, DoctorRoster, RecordStore, Registration,
    ScheduleRegistry, ScheduleUpdate, SearchQuery,
};

use crate::cli::{Commands, PatientCommand, RegistrationCommand, ScheduleCommand, SearchArgs};
use crate::output::{
    print_output, AvailabilityTable, Message, PatientOutput, RegistrationList,
    RegistrationOutput, RosterOutput, ScheduleTable, StatsOutput,
};

/// Handles for the open store and the clock.
pub struct App<'a> {
    pub store: &'a dyn RecordStore,
    pub clock: &'a dyn Clock,
    pub json: bool,
}

impl<'a> App<'a> {
    pub fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Schedules(cmd) => self.schedules(cmd),
            Commands::Patients(cmd) => self.patients(cmd),
            Commands::Book {
                patient_id,
                schedule_id,
            } => {
                let registration = self.booking().register(&patient_id, &schedule_id)?;
                self.print_registration(registration);
                Ok(())
            }
            Commands::Cancel { registration_id } => {
                let registration = self.booking().cancel(&registration_id)?;
                self.print_registration(registration);
                Ok(())
            }
            Commands::Reschedule {
                registration_id,
                schedule_id,
            } => {
                let registration = self.booking().reschedule(&registration_id, &schedule_id)?;
                self.print_registration(registration);
                Ok(())
            }
            Commands::Registrations(cmd) => self.registrations(cmd),
            Commands::Stats => {
                let directory = Directory::new(self.store);
                let registrations: Vec<Registration> = load(self.store)?;
                let schedules = ScheduleRegistry::new(self.store).list()?;
                let stats = ClinicStats::compute(
                    &directory.doctors()?,
                    &directory.patients()?,
                    &schedules,
                    &registrations,
                );
                print_output(&StatsOutput(stats), self.json);
                Ok(())
            }
        }
    }

    fn booking(&self) -> BookingEngine<'a> {
        BookingEngine::new(self.store, self.clock)
    }

    fn schedules(&self, command: ScheduleCommand) -> Result<()> {
        let registry = ScheduleRegistry::new(self.store);
        let directory = Directory::new(self.store);

        match command {
            ScheduleCommand::List { doctor } => {
                let listings = match doctor {
                    Some(doctor_id) => directory.annotate(registry.list_for_doctor(&doctor_id)?)?,
                    None => directory.listings()?,
                };
                print_output(&ScheduleTable(listings), self.json);
            }
            ScheduleCommand::Show { schedule_id } => {
                let schedule = registry.get(&schedule_id)?;
                print_output(&ScheduleTable(directory.annotate(vec![schedule])?), self.json);
            }
            ScheduleCommand::Add(args) => {
                let schedule =
                    registry.create(&args.doctor_id, args.day, &args.start, &args.end, args.quota)?;
                print_output(
                    &Message::success(format!(
                        "Created {} for {}: {} (quota {})",
                        schedule.id,
                        directory.doctor_name(&schedule.doctor_id)?,
                        schedule.describe(),
                        schedule.quota
                    )),
                    self.json,
                );
            }
            ScheduleCommand::Edit(args) => {
                let update = ScheduleUpdate {
                    day: args.day,
                    start: args.start,
                    end: args.end,
                    quota: args.quota,
                };
                let schedule = registry.edit(&args.schedule_id, update)?;
                print_output(
                    &Message::success(format!(
                        "Updated {}: {} (quota {})",
                        schedule.id,
                        schedule.describe(),
                        schedule.quota
                    )),
                    self.json,
                );
            }
            ScheduleCommand::Delete { schedule_id } => {
                let removed = registry.delete(&schedule_id)?;
                print_output(
                    &Message::success(format!("Deleted {} ({})", removed.id, removed.describe())),
                    self.json,
                );
            }
            ScheduleCommand::Search(args) => {
                let found = directory.search_schedules(&search_query(args)?)?;
                print_output(&ScheduleTable(found), self.json);
            }
            ScheduleCommand::Availability => {
                let slots = self.booking().availability()?;
                print_output(&AvailabilityTable(slots), self.json);
            }
        }
        Ok(())
    }

    fn patients(&self, command: PatientCommand) -> Result<()> {
        let directory = Directory::new(self.store);

        match command {
            PatientCommand::Add {
                name,
                username,
                contact,
            } => {
                let patient = directory.register_patient(&name, &username, &contact)?;
                print_output(
                    &Message::success(format!("Registered {} as {}", patient.name, patient.id)),
                    self.json,
                );
            }
            PatientCommand::Show { patient_id } => {
                let patient = directory
                    .patient(&patient_id)?
                    .ok_or_else(|| anyhow!("Patient not found: {}", patient_id))?;
                let registrations = self.with_distance(
                    self.booking().registrations_for_patient(&patient_id)?,
                );
                print_output(
                    &PatientOutput {
                        patient,
                        registrations,
                    },
                    self.json,
                );
            }
        }
        Ok(())
    }

    fn registrations(&self, command: RegistrationCommand) -> Result<()> {
        match command {
            RegistrationCommand::Patient { patient_id } => {
                let registrations = self.booking().registrations_for_patient(&patient_id)?;
                print_output(&RegistrationList(self.with_distance(registrations)), self.json);
            }
            RegistrationCommand::Doctor { doctor_id, csv } => {
                let directory = Directory::new(self.store);
                if directory.doctor(&doctor_id)?.is_none() {
                    return Err(praktek_core::ClinicError::DoctorNotFound(doctor_id).into());
                }
                let registrations = self.booking().registrations_for_doctor(&doctor_id)?;
                let roster = DoctorRoster::build(
                    &doctor_id,
                    &registrations,
                    &directory.patients()?,
                    &ScheduleRegistry::new(self.store).list_for_doctor(&doctor_id)?,
                );
                if csv {
                    print!("{}", roster.to_csv());
                } else if self.json {
                    println!("{}", roster.to_json().context("failed to serialize roster")?);
                } else {
                    print_output(
                        &RosterOutput {
                            registrations: self.with_distance(registrations),
                            roster,
                        },
                        false,
                    );
                }
            }
        }
        Ok(())
    }

    fn with_distance(&self, registrations: Vec<Registration>) -> Vec<RegistrationOutput> {
        let booking = self.booking();
        registrations
            .into_iter()
            .map(|registration| RegistrationOutput {
                when: booking.distance(&registration),
                registration,
            })
            .collect()
    }

    fn print_registration(&self, registration: Registration) {
        let output = RegistrationOutput {
            when: self.booking().distance(&registration),
            registration,
        };
        print_output(&output, self.json);
    }
}

fn search_query(args: SearchArgs) -> Result<SearchQuery> {
    match (args.doctor, args.specialty, args.day) {
        (Some(name), None, None) => Ok(SearchQuery::DoctorName(name)),
        (None, Some(specialty), None) => Ok(SearchQuery::Specialty(specialty)),
        (None, None, Some(day)) => Ok(SearchQuery::Day(day)),
        _ => Err(anyhow!("give exactly one of --doctor, --specialty or --day")),
    }
}
