// Interactive keypad REPL (raw-mode terminal).
//
// Key surface: digits, + - * / % ^ ( ) and '.', Enter evaluates, Backspace
// deletes one character, Escape clears, 'q' or Ctrl-C quits. Letters map to
// the scientific keys: s=sin c=cos t=tan l=log r=sqrt p=pi.

use std::io::{self, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType};
use tally_engine::expr::Func;
use tally_engine::input::{Constant, Key};

use crate::session::Session;

pub fn run(session: &mut Session) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    let outcome = event_loop(session);
    terminal::disable_raw_mode()?;
    println!();
    outcome
}

fn event_loop(session: &mut Session) -> io::Result<()> {
    let mut stdout = io::stdout();
    writeln!(
        stdout,
        "tally keypad — Enter evaluates, Backspace deletes, Esc clears, q quits"
    )?;
    draw(&mut stdout, session)?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
            KeyCode::Char('q') => break,
            KeyCode::Enter => {
                session.calculate();
            }
            KeyCode::Backspace => session.delete(),
            KeyCode::Esc => session.clear(),
            KeyCode::Char(c) => {
                if let Some(key) = keypad_key(c) {
                    session.press(key);
                }
            }
            _ => {}
        }

        draw(&mut stdout, session)?;
    }

    Ok(())
}

fn keypad_key(c: char) -> Option<Key> {
    // Typing surface first, then the scientific letter keys.
    Key::from_char(c).or(match c {
        's' => Some(Key::Func(Func::Sin)),
        'c' => Some(Key::Func(Func::Cos)),
        't' => Some(Key::Func(Func::Tan)),
        'l' => Some(Key::Func(Func::Log)),
        'r' => Some(Key::Func(Func::Sqrt)),
        'p' => Some(Key::Const(Constant::Pi)),
        'e' => Some(Key::Const(Constant::E)),
        _ => None,
    })
}

fn draw(stdout: &mut io::Stdout, session: &Session) -> io::Result<()> {
    execute!(stdout, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    if session.result().is_empty() {
        write!(stdout, "> {}", session.expression())?;
    } else {
        write!(stdout, "> {} = {}", session.expression(), session.result())?;
    }
    stdout.flush()
}
