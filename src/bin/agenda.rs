use chrono::Local;
use labweek::{
    AgendaStore, SlotUpdate, SqliteAgendaStore, WeekDay, availability_pivot,
    load_week_from_json, save_availability_to_csv, save_week_to_json, text_table, week_span,
};
use polars::prelude::*;
use std::env;
use std::io::{self, Write};
use std::process;

fn print_help() {
    println!(
        "Commands:\n  help                                Show this help\n  subjects                            List subjects\n  addsubject <name...>                Register a subject\n  staff <subject...>                  List staff for a subject\n  addstaff <name> <subject...>        Register a staff member (seeds their week)\n  grid <staff>                        Show the weekly availability grid\n  set <staff> <day> <row> <status...> Update one cell (row as shown by grid)\n  missions <staff>                    List pending missions\n  addmission <staff> <text...>        Add a mission\n  done <id>                           Mark a mission completed\n  completed <staff>                   List completed missions\n  rm <staff> <id>                     Remove a completed mission\n  export <staff> <path>               Save the staff week as JSON\n  exportcsv <staff> <path>            Save the availability grid as CSV\n  import <path>                       Restore a JSON week snapshot\n  quit|exit                           Exit"
    );
}

fn numbered(df: &DataFrame) -> PolarsResult<DataFrame> {
    let index: Vec<i64> = (1..=df.height() as i64).collect();
    let mut columns: Vec<Column> = vec![Series::new("#".into(), index).into_column()];
    columns.extend(df.get_columns().iter().cloned());
    DataFrame::new(columns)
}

fn show_grid(store: &SqliteAgendaStore, staff: &str) {
    match store.get_availability(staff) {
        Ok(slots) if slots.is_empty() => println!("No availability stored for '{staff}'."),
        Ok(slots) => match availability_pivot(&slots).and_then(|df| numbered(&df)) {
            Ok(df) => println!("{}", text_table(&df)),
            Err(e) => println!("Error: {}", e),
        },
        Err(e) => println!("Error: {}", e),
    }
}

fn main() {
    let db_path = env::args().nth(1).unwrap_or_else(|| "memoria.db".to_string());
    let store = match SqliteAgendaStore::new(&db_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: cannot open store at {db_path}: {e}");
            process::exit(1);
        }
    };

    let (monday, friday) = week_span(Local::now().date_naive());
    println!("Agenda - week {monday} to {friday} - store {db_path}");
    println!("Type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "subjects" => match store.list_subjects() {
                Ok(subjects) if subjects.is_empty() => println!("No subjects yet."),
                Ok(subjects) => {
                    for subject in subjects {
                        println!("{subject}");
                    }
                }
                Err(e) => println!("Error: {}", e),
            },
            "addsubject" => {
                let name: Vec<&str> = parts.collect();
                if name.is_empty() {
                    println!("Usage: addsubject <name...>");
                    continue;
                }
                let name = name.join(" ");
                match store.add_subject(&name) {
                    Ok(()) => println!("Subject '{name}' registered."),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "staff" => {
                let subject: Vec<&str> = parts.collect();
                if subject.is_empty() {
                    println!("Usage: staff <subject...>");
                    continue;
                }
                let subject = subject.join(" ");
                match store.list_staff_by_subject(&subject) {
                    Ok(staff) if staff.is_empty() => println!("No staff in '{subject}'."),
                    Ok(staff) => {
                        for name in staff {
                            println!("{name}");
                        }
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "addstaff" => {
                let name = parts.next();
                let subject: Vec<&str> = parts.collect();
                match (name, !subject.is_empty()) {
                    (Some(name), true) => {
                        let subject = subject.join(" ");
                        match store.add_staff(name, &subject) {
                            Ok(()) => {
                                println!("Staff '{name}' registered in '{subject}'.");
                                show_grid(&store, name);
                            }
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: addstaff <name> <subject...>"),
                }
            }
            "grid" => match parts.next() {
                Some(staff) => show_grid(&store, staff),
                None => println!("Usage: grid <staff>"),
            },
            "set" => {
                let staff = parts.next();
                let day_s = parts.next();
                let row_s = parts.next();
                let status: Vec<&str> = parts.collect();
                match (staff, day_s, row_s, !status.is_empty()) {
                    (Some(staff), Some(day_s), Some(row_s), true) => {
                        let day: WeekDay = match day_s.parse() {
                            Ok(day) => day,
                            Err(e) => {
                                println!("{}", e);
                                continue;
                            }
                        };
                        let row: usize = match row_s.parse() {
                            Ok(v) if v >= 1 => v,
                            _ => {
                                println!("Invalid row (1-based, as shown by grid)");
                                continue;
                            }
                        };
                        let slots = match store.get_availability(staff) {
                            Ok(slots) => slots,
                            Err(e) => {
                                println!("Error: {}", e);
                                continue;
                            }
                        };
                        let mut times: Vec<String> = Vec::new();
                        for slot in &slots {
                            if !times.contains(&slot.time_range) {
                                times.push(slot.time_range.clone());
                            }
                        }
                        let Some(time_range) = times.get(row - 1).cloned() else {
                            println!("Row {row} is out of range ({} rows)", times.len());
                            continue;
                        };
                        let update = SlotUpdate {
                            day,
                            time_range,
                            status: status.join(" "),
                        };
                        match store.set_availability(staff, std::slice::from_ref(&update)) {
                            Ok(()) => show_grid(&store, staff),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: set <staff> <day> <row> <status...>"),
                }
            }
            "missions" => match parts.next() {
                Some(staff) => match store.pending_missions(staff) {
                    Ok(missions) if missions.is_empty() => println!("No pending missions."),
                    Ok(missions) => {
                        for mission in missions {
                            println!("[{}] {}", mission.id, mission.text);
                        }
                    }
                    Err(e) => println!("Error: {}", e),
                },
                None => println!("Usage: missions <staff>"),
            },
            "addmission" => {
                let staff = parts.next();
                let text: Vec<&str> = parts.collect();
                match (staff, !text.is_empty()) {
                    (Some(staff), true) => match store.add_mission(staff, &text.join(" ")) {
                        Ok(id) => println!("Mission {id} added."),
                        Err(e) => println!("Error: {}", e),
                    },
                    _ => println!("Usage: addmission <staff> <text...>"),
                }
            }
            "done" => match parts.next().and_then(|s| s.parse::<i64>().ok()) {
                Some(id) => match store.complete_mission(id) {
                    Ok(true) => println!("Mission {id} completed."),
                    Ok(false) => println!("No mission with id {id}."),
                    Err(e) => println!("Error: {}", e),
                },
                None => println!("Usage: done <id>"),
            },
            "completed" => match parts.next() {
                Some(staff) => match store.completed_missions(staff) {
                    Ok(missions) if missions.is_empty() => println!("Nothing completed yet."),
                    Ok(missions) => {
                        for mission in missions {
                            println!("[{}] {}", mission.id, mission.text);
                        }
                    }
                    Err(e) => println!("Error: {}", e),
                },
                None => println!("Usage: completed <staff>"),
            },
            "rm" => {
                let staff = parts.next();
                let id = parts.next().and_then(|s| s.parse::<i64>().ok());
                match (staff, id) {
                    (Some(staff), Some(id)) => {
                        // Only completed missions can be removed.
                        let completed = match store.completed_missions(staff) {
                            Ok(missions) => missions,
                            Err(e) => {
                                println!("Error: {}", e);
                                continue;
                            }
                        };
                        if !completed.iter().any(|mission| mission.id == id) {
                            println!("Mission {id} is not in '{staff}' completed list.");
                            continue;
                        }
                        match store.delete_mission(id) {
                            Ok(true) => println!("Mission {id} removed."),
                            Ok(false) => println!("No mission with id {id}."),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: rm <staff> <id>"),
                }
            }
            "export" => {
                let staff = parts.next();
                let path = parts.next();
                match (staff, path) {
                    (Some(staff), Some(path)) => match save_week_to_json(&store, staff, path) {
                        Ok(()) => println!("Week saved to {path}."),
                        Err(e) => println!("Error: {}", e),
                    },
                    _ => println!("Usage: export <staff> <path>"),
                }
            }
            "exportcsv" => {
                let staff = parts.next();
                let path = parts.next();
                match (staff, path) {
                    (Some(staff), Some(path)) => {
                        match save_availability_to_csv(&store, staff, path) {
                            Ok(()) => println!("Grid saved to {path}."),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: exportcsv <staff> <path>"),
                }
            }
            "import" => match parts.next() {
                Some(path) => match load_week_from_json(&store, path) {
                    Ok(snapshot) => {
                        println!("Week restored for '{}'.", snapshot.staff);
                        show_grid(&store, &snapshot.staff);
                    }
                    Err(e) => println!("Error: {}", e),
                },
                None => println!("Usage: import <path>"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
