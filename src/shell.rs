//! Interactive operator menu

use std::io::{BufRead, Write};

use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::{EntryReceipt, ExitReceipt},
    operator::{ConsoleOperator, OperatorInput},
    services::Services,
};

const MENU_INCOMING: i32 = 1;
const MENU_EXITING: i32 = 2;
const MENU_SHUTDOWN: i32 = 3;

/// Run the operator menu until shutdown is chosen or input is closed.
///
/// Workflow errors are reported to the operator and the menu continues;
/// only a broken console ends the loop with an error.
pub async fn run<R: BufRead, W: Write>(
    services: &Services,
    operator: &mut ConsoleOperator<R, W>,
) -> AppResult<()> {
    let loyalty_discount = services.fares.loyalty_discount();
    tracing::info!("App initialized");
    writeln!(operator.output(), "Welcome to Parking System!")?;

    loop {
        load_menu(operator.output())?;
        let option = operator.read_selection();
        if operator.is_closed() {
            tracing::info!("Operator input closed");
            break;
        }

        match option {
            MENU_INCOMING => {
                writeln!(operator.output(), "Please select vehicle type from menu")?;
                writeln!(operator.output(), "1 CAR")?;
                writeln!(operator.output(), "2 BIKE")?;
                match services.parking.process_incoming_vehicle(operator).await {
                    Ok(Some(receipt)) => report_entry(operator.output(), &receipt, loyalty_discount)?,
                    Ok(None) => {
                        writeln!(operator.output(), "Incorrect vehicle type, please try again")?;
                    }
                    Err(e) => report_error(operator.output(), &e)?,
                }
            }
            MENU_EXITING => match services.parking.process_exiting_vehicle(operator).await {
                Ok(receipt) => report_exit(operator.output(), &receipt)?,
                Err(e) => report_error(operator.output(), &e)?,
            },
            MENU_SHUTDOWN => {
                writeln!(operator.output(), "Exiting from the system!")?;
                break;
            }
            _ => {
                writeln!(
                    operator.output(),
                    "Unsupported option. Please enter a number corresponding to the provided menu"
                )?;
            }
        }
    }

    Ok(())
}

fn load_menu(out: &mut impl Write) -> AppResult<()> {
    writeln!(out, "Please select an option. Simply enter the number to choose an action")?;
    writeln!(out, "1 New Vehicle Entering - Allocate Parking Space")?;
    writeln!(out, "2 Vehicle Exiting - Generate Ticket Price")?;
    writeln!(out, "3 Shutdown System")?;
    out.flush()?;
    Ok(())
}

fn report_entry(out: &mut impl Write, receipt: &EntryReceipt, loyalty_discount: Decimal) -> AppResult<()> {
    let ticket = &receipt.ticket;
    if receipt.returning_customer {
        let percent = ((Decimal::ONE - loyalty_discount) * Decimal::ONE_HUNDRED).normalize();
        writeln!(
            out,
            "Welcome back! As a recurring user of our parking lot, you'll benefit from a {}% discount.",
            percent
        )?;
    }
    writeln!(out, "Generated Ticket and saved in DB")?;
    writeln!(out, "Please park your vehicle in spot number: {}", ticket.spot.id)?;
    writeln!(
        out,
        "Recorded in-time for vehicle number: {} is: {}",
        ticket.vehicle_registration_number,
        ticket.in_time.format("%Y-%m-%d %H:%M:%S")
    )?;
    Ok(())
}

fn report_exit(out: &mut impl Write, receipt: &ExitReceipt) -> AppResult<()> {
    let ticket = &receipt.ticket;
    writeln!(out, "Please pay the parking fare: {:.2}", ticket.price)?;
    if let Some(out_time) = ticket.out_time {
        writeln!(
            out,
            "Recorded out-time for vehicle number: {} is: {}",
            ticket.vehicle_registration_number,
            out_time.format("%Y-%m-%d %H:%M:%S")
        )?;
    }
    Ok(())
}

fn report_error(out: &mut impl Write, error: &AppError) -> AppResult<()> {
    if error.is_expected() {
        tracing::warn!("{}", error);
    } else {
        tracing::error!("{}", error);
    }

    let message = match error {
        AppError::CapacityExhausted(category) => {
            format!("No {} spot available, the parking is full for this vehicle type", category)
        }
        AppError::NotFound(_) => "No parked vehicle found for this registration number".to_string(),
        AppError::InvalidInput(msg) => format!("Invalid input: {}", msg),
        AppError::Persistence(_) => {
            "Unable to record the operation, please contact the parking manager".to_string()
        }
        other => format!("Unable to process vehicle: {}", other),
    };
    writeln!(out, "{}", message)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, sync::Arc};

    use super::*;
    use crate::{
        config::{FacilityConfig, FareConfig},
        repository::MemoryParkingStore,
    };

    async fn session(input: &str) -> String {
        let store = Arc::new(MemoryParkingStore::for_facility(&FacilityConfig::default()));
        let services = Services::new(store, FareConfig::default());
        let mut operator = ConsoleOperator::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());

        run(&services, &mut operator).await.unwrap();

        String::from_utf8(operator.output().clone()).unwrap()
    }

    #[tokio::test]
    async fn test_park_and_exit() {
        let output = session("1\n1\nABCDEF\n2\nABCDEF\n3\n").await;

        assert!(output.contains("Please park your vehicle in spot number: 1"));
        assert!(output.contains("Please pay the parking fare: 0.00"));
        assert!(output.contains("Exiting from the system!"));
        assert!(!output.contains("Welcome back!"));
    }

    #[tokio::test]
    async fn test_returning_customer_is_welcomed() {
        let output = session("1\n2\nXYZ\n2\nXYZ\n1\n2\nXYZ\n3\n").await;

        assert!(output.contains("Please park your vehicle in spot number: 4"));
        assert!(output.contains("you'll benefit from a 5% discount."));
    }

    #[tokio::test]
    async fn test_empty_registration_is_asked_again() {
        let output = session("1\n1\n\nABCDEF\n3\n").await;

        assert!(output.contains("Invalid input: vehicle registration number must not be empty"));
        assert!(output.contains("Please park your vehicle in spot number: 1"));
        assert!(output.contains("Recorded in-time for vehicle number: ABCDEF"));
        assert!(!output.contains("Unsupported option."));
    }

    #[tokio::test]
    async fn test_unknown_vehicle_exit() {
        let output = session("2\nNOPE\n3\n").await;
        assert!(output.contains("No parked vehicle found"));
    }

    #[tokio::test]
    async fn test_invalid_options() {
        let output = session("9\n1\n7\n3\n").await;

        assert!(output.contains("Unsupported option."));
        assert!(output.contains("Incorrect vehicle type, please try again"));
    }

    #[tokio::test]
    async fn test_stops_at_end_of_input() {
        let output = session("").await;
        assert!(output.contains("Welcome to Parking System!"));
        assert!(!output.contains("Exiting from the system!"));
    }
}
