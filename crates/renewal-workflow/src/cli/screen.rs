/*
[INPUT]:  Orchestrator, queued notifications and user input via prompts
[OUTPUT]: Console rendering of each workflow step and user operations
[POS]:    CLI interactive renewal screen
[UPDATE]: When workflow steps or operations change
*/

use std::sync::{Arc, Mutex};

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use tokio::sync::mpsc;

use renewal_workflow::{
    BusyIndicator, FieldChange, Navigator, Notification, Orchestrator, Severity, Step,
    SubmitOutcome, WorkflowState,
};

/// Prints a progress line while a remote call is in flight
#[derive(Debug, Default)]
pub struct ConsoleBusyIndicator;

impl BusyIndicator for ConsoleBusyIndicator {
    fn set_busy(&self, busy: bool) {
        if busy {
            println!("{}", style("working...").dim());
        }
    }
}

/// Remembers the requested route; the screen loop exits when one is set
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    requested: Mutex<Option<String>>,
}

impl ConsoleNavigator {
    fn take_route(&self) -> Option<String> {
        match self.requested.lock() {
            Ok(mut requested) => requested.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: &str) {
        match self.requested.lock() {
            Ok(mut requested) => *requested = Some(route.to_string()),
            Err(poisoned) => *poisoned.into_inner() = Some(route.to_string()),
        }
    }
}

pub async fn run_screen(
    mut orchestrator: Orchestrator,
    mut notifications: mpsc::UnboundedReceiver<Notification>,
    navigator: Arc<ConsoleNavigator>,
) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!("{}", style("Certificate renewal").bold().cyan());

    orchestrator.enter().await;

    loop {
        print_notifications(&mut notifications);
        if let Some(route) = navigator.take_route() {
            println!("{}", style(format!("Returning to {route}")).dim());
            break;
        }

        let state = orchestrator.state().clone();
        let keep_going = match state.step {
            Step::Loading => render_loading(&theme, &mut orchestrator, &state).await?,
            Step::List => render_list(&theme, &mut orchestrator, &state).await?,
            Step::Form => render_form(&theme, &mut orchestrator).await?,
            Step::Popup => render_popup(&theme, &mut orchestrator, &state).await?,
        };
        if !keep_going {
            break;
        }
    }

    orchestrator.leave();
    print_notifications(&mut notifications);
    Ok(())
}

fn print_notifications(notifications: &mut mpsc::UnboundedReceiver<Notification>) {
    while let Ok(notification) = notifications.try_recv() {
        let line = match notification.severity {
            Severity::Info => style(notification.message).cyan(),
            Severity::Success => style(notification.message).green(),
            Severity::Warning => style(notification.message).yellow(),
            Severity::Error => style(notification.message).red().bold(),
        };
        println!("{line}");
    }
}

async fn render_loading(
    theme: &ColorfulTheme,
    orchestrator: &mut Orchestrator,
    state: &WorkflowState,
) -> Result<bool> {
    if state.last_error.is_none() {
        orchestrator.enter().await;
        return Ok(true);
    }

    let retry = Confirm::with_theme(theme)
        .with_prompt("Loading failed. Try again?")
        .default(true)
        .interact()?;
    if retry {
        orchestrator.leave();
        orchestrator.enter().await;
    }
    Ok(retry)
}

async fn render_list(
    theme: &ColorfulTheme,
    orchestrator: &mut Orchestrator,
    state: &WorkflowState,
) -> Result<bool> {
    println!("\n{}", style(&state.labels.list.label1).bold());
    if !state.labels.list.label2.is_empty() {
        println!("{}", style(&state.labels.list.label2).dim());
    }
    if state.records.is_empty() {
        println!("{}", style("No renewable records.").yellow());
        return Ok(false);
    }

    let mut items: Vec<String> = state.records.iter().map(ToString::to_string).collect();
    items.push("Exit".to_string());
    let selection = Select::with_theme(theme)
        .with_prompt("Select a record to renew")
        .items(&items)
        .default(0)
        .interact()?;

    let Some(record) = state.records.get(selection) else {
        return Ok(false);
    };
    orchestrator.renew_requested(record.clone()).await;
    Ok(true)
}

async fn render_form(theme: &ColorfulTheme, orchestrator: &mut Orchestrator) -> Result<bool> {
    let state = orchestrator.state().clone();
    if let Some(record) = state.selected_record.as_ref() {
        println!("\n{} {}", style("Renewing").bold(), record);
    }

    if !state.renew_options.is_empty() {
        let selection = Select::with_theme(theme)
            .with_prompt("Renewal option")
            .items(&state.renew_options)
            .default(state.selected_renew_index().unwrap_or(0))
            .interact()?;
        if let Some(change) = renew_option_change(&state, selection) {
            orchestrator.field_changed(change);
        }
        if let Some(option) = orchestrator.state().selected_renew_option() {
            if !option.rich_text.is_empty() {
                println!("{}", style(&option.rich_text).dim());
            }
        }
    }

    // Fields depend on the option just chosen
    let state = orchestrator.state().clone();
    if state.derived.show_account_field && !state.account_options.is_empty() {
        let selection = Select::with_theme(theme)
            .with_prompt("Account")
            .items(&state.account_options)
            .default(state.selected_account_index().unwrap_or(0))
            .interact()?;
        let value = state.account_options[selection].value.clone();
        orchestrator.field_changed(FieldChange::AccountOption(value));
    }
    if state.derived.show_note_field {
        if state.derived.note_validation_failed {
            println!("{}", style("A note is required for this option.").red());
        }
        let note: String = Input::with_theme(theme)
            .with_prompt("Note")
            .with_initial_text(state.form.note_text.clone())
            .allow_empty(true)
            .interact_text()?;
        orchestrator.field_changed(FieldChange::Note(note));
    }

    let actions = ["Submit", "Edit again", "Cancel"];
    let action = Select::with_theme(theme)
        .with_prompt("Next")
        .items(&actions)
        .default(0)
        .interact()?;
    match action {
        0 => {
            if orchestrator.submit_requested().await == SubmitOutcome::ValidationFailed {
                println!("{}", style("A note is required for this option.").red());
            }
        }
        1 => {}
        _ => {
            orchestrator.cancel_requested();
        }
    }
    Ok(true)
}

/// Change to dispatch for the picked option; none when it is already selected
fn renew_option_change(state: &WorkflowState, selection: usize) -> Option<FieldChange> {
    let value = &state.renew_options.get(selection)?.value;
    if state.form.selected_renew_option.as_deref() == Some(value.as_str()) {
        return None;
    }
    Some(FieldChange::RenewOption(value.clone()))
}

async fn render_popup(
    theme: &ColorfulTheme,
    orchestrator: &mut Orchestrator,
    state: &WorkflowState,
) -> Result<bool> {
    println!("\n{}", style(&state.labels.popup.label1).bold().yellow());
    let prompt = if state.labels.popup.label2.is_empty() {
        "Overwrite existing preferences?".to_string()
    } else {
        state.labels.popup.label2.clone()
    };
    let confirmed = Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(false)
        .interact()?;

    if confirmed {
        orchestrator.confirm_submit().await;
    } else {
        orchestrator.popup_dismissed();
    }
    Ok(true)
}
