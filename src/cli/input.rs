//! User input utilities for interactive CLI prompts
//!
//! Numbered menus for city, filter and action selection plus yes/no
//! confirmation prompts. Each prompt re-asks until the answer is valid.

use crate::error::{BikeshareError, Result};
use crate::models::{City, DayOfWeek, FilterSpec, Month, Selection};
use crate::stats::StatisticFamily;
use std::io::{self, Write};

/// An action chosen from the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewRawData,
    Analyze(StatisticFamily),
    NewInputs,
    Exit,
}

impl Action {
    pub const MENU: [Action; 7] = [
        Action::ViewRawData,
        Action::Analyze(StatisticFamily::Time),
        Action::Analyze(StatisticFamily::Station),
        Action::Analyze(StatisticFamily::Duration),
        Action::Analyze(StatisticFamily::User),
        Action::NewInputs,
        Action::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Action::ViewRawData => "View raw data",
            Action::Analyze(StatisticFamily::Time) => "Analyze the time data",
            Action::Analyze(StatisticFamily::Station) => "Analyze the station data",
            Action::Analyze(StatisticFamily::Duration) => "Analyze the trip duration data",
            Action::Analyze(StatisticFamily::User) => "Analyze the users data",
            Action::NewInputs => "Supply new inputs",
            Action::Exit => "Exit",
        }
    }
}

/// Axes the user wants to filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    None,
    Month,
    Day,
    Both,
}

impl FilterMode {
    pub const MENU: [FilterMode; 4] = [
        FilterMode::None,
        FilterMode::Month,
        FilterMode::Day,
        FilterMode::Both,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterMode::None => "No filter",
            FilterMode::Month => "Filter by month",
            FilterMode::Day => "Filter by day of week",
            FilterMode::Both => "Filter by month and day of week",
        }
    }
}

/// Read one line from stdin, failing when input is closed
fn read_line() -> Result<String> {
    io::stdout().flush()?;

    let mut input = String::new();
    let bytes = io::stdin().read_line(&mut input)?;
    if bytes == 0 {
        return Err(BikeshareError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed",
        )));
    }
    Ok(input)
}

/// Match an answer against numbered options, by number or by label text
pub fn parse_menu_choice(input: &str, options: &[&str]) -> Option<usize> {
    let input = input.trim();
    if let Ok(choice) = input.parse::<usize>() {
        return (1..=options.len()).contains(&choice).then(|| choice - 1);
    }
    options
        .iter()
        .position(|option| option.eq_ignore_ascii_case(input))
}

/// Show a numbered menu and return the index of the chosen option
pub fn prompt_menu(title: &str, options: &[&str]) -> Result<usize> {
    if options.is_empty() {
        return Err(BikeshareError::configuration(format!(
            "No options available for '{}'",
            title
        )));
    }

    loop {
        println!("\n{}", title);
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }
        print!("Select 1-{}: ", options.len());

        let input = read_line()?;
        match parse_menu_choice(&input, options) {
            Some(index) => return Ok(index),
            None => println!(
                "Invalid selection '{}'. Please choose 1-{}.",
                input.trim(),
                options.len()
            ),
        }
    }
}

/// Choose one of the cities with a dataset on disk
pub fn prompt_city(cities: &[City]) -> Result<City> {
    let labels: Vec<&str> = cities.iter().map(City::display_name).collect();
    let index = prompt_menu("Which city would you like to explore?", &labels)?;
    Ok(cities[index])
}

/// Choose a filter mode, then the month and/or day it needs
pub fn prompt_filter() -> Result<FilterSpec> {
    let labels: Vec<&str> = FilterMode::MENU.iter().map(FilterMode::label).collect();
    let mode = FilterMode::MENU[prompt_menu("How would you like to filter the data?", &labels)?];

    let month = match mode {
        FilterMode::Month | FilterMode::Both => Selection::Only(prompt_month()?),
        _ => Selection::All,
    };
    let day = match mode {
        FilterMode::Day | FilterMode::Both => Selection::Only(prompt_day()?),
        _ => Selection::All,
    };

    Ok(FilterSpec::new(month, day))
}

fn prompt_month() -> Result<Month> {
    let labels: Vec<&str> = Month::ALL.iter().map(Month::name).collect();
    Ok(Month::ALL[prompt_menu("Which month?", &labels)?])
}

fn prompt_day() -> Result<DayOfWeek> {
    let labels: Vec<&str> = DayOfWeek::ALL.iter().map(DayOfWeek::name).collect();
    Ok(DayOfWeek::ALL[prompt_menu("Which day of the week?", &labels)?])
}

/// Main menu
pub fn prompt_action() -> Result<Action> {
    let labels: Vec<&str> = Action::MENU.iter().map(Action::label).collect();
    Ok(Action::MENU[prompt_menu("What would you like to do?", &labels)?])
}

/// Interpret a yes/no answer; empty input takes the default
pub fn parse_yes_no(input: &str, default_yes: bool) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "" => Some(default_yes),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Get user confirmation for an action
pub fn prompt_confirmation(message: &str, default_yes: bool) -> Result<bool> {
    let default_text = if default_yes { "Y/n" } else { "y/N" };

    loop {
        print!("{} [{}]: ", message, default_text);
        match parse_yes_no(&read_line()?, default_yes) {
            Some(answer) => return Ok(answer),
            None => println!("Please enter 'y' for yes or 'n' for no."),
        }
    }
}

/// Wait for the user to press Enter
pub fn wait_for_acknowledgment(message: &str) -> Result<()> {
    if !message.is_empty() {
        println!("{}", message);
    }
    print!("Press Enter to continue...");
    read_line()?;
    Ok(())
}
