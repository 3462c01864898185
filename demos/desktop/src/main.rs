mod error;

use error::DesktopError;
use glfw::{Action, Context as _, Key, WindowEvent};
use glstart_exercises::{Exercise, InputAction, LoopFeedback};
use glstart_glfw::{GlfwSurface, WindowOpt};
use std::{iter, process, time::Instant};
use structopt::StructOpt;

const TITLE: &str = "LearnOpenGl";

#[derive(Debug, StructOpt)]
pub struct CLIOpts {
  #[structopt(short, long)]
  /// List available exercises.
  list_exercises: bool,

  #[structopt(long, default_value = "800")]
  /// Width of the window.
  width: u32,

  #[structopt(long, default_value = "600")]
  /// Height of the window.
  height: u32,

  /// Exercise to run.
  exercise: Option<String>,
}

/// Macro to declaratively add exercises.
macro_rules! exercises {
  ($($ex_name:literal, $ex_ident:ident),* $(,)?) => {
    const EXERCISE_NAMES: &[&str] = &[$($ex_name),*];

    fn show_available_exercises() {
      println!("available exercises:");

      for name in EXERCISE_NAMES {
        println!("  - {}", name);
      }
    }

    // create a function that will run an exercise based on its name
    fn pick_and_run_exercise(cli_opts: CLIOpts) -> Result<(), DesktopError> {
      let opt = WindowOpt::default().set_dim(cli_opts.width, cli_opts.height);

      match cli_opts.exercise.as_deref() {
        $(
          Some($ex_name) => {
            run_exercise::<glstart_exercises::$ex_ident::LocalExercise>(opt, $ex_name)
          }
        ),*

        Some(name) => Err(DesktopError::UnknownExercise(name.to_owned())),
        None => Err(DesktopError::NoExercise),
      }
    }
  }
}

// Run an exercise until it exits or fails to bootstrap.
fn run_exercise<E>(opt: WindowOpt, name: &str) -> Result<(), DesktopError>
where
  E: Exercise,
{
  let mut surface = GlfwSurface::new_gl30(TITLE, opt)?;

  let exercise = E::bootstrap(&mut surface.gl)?;
  log::info!("running {}", name);
  let start_t = Instant::now();

  // render a first frame with the actual framebuffer size, which might differ from the window
  // size (high-DPI screens)
  let [fb_w, fb_h] = surface.framebuffer_size();
  let feedback = exercise.render_frame(
    0.,
    iter::once(InputAction::Resized {
      width: fb_w,
      height: fb_h,
    }),
    &mut surface.gl,
  );
  let mut exercise = match feedback {
    LoopFeedback::Exit => return Ok(()),
    LoopFeedback::Continue(exercise) => exercise,
  };
  surface.window.swap_buffers();

  'app: loop {
    // handle events
    surface.window.glfw.poll_events();
    let actions =
      glfw::flush_messages(&surface.events_rx).flat_map(|(_, event)| adapt_events(event));

    let t = start_t.elapsed().as_secs_f32();
    let feedback = exercise.render_frame(t, actions, &mut surface.gl);

    if let LoopFeedback::Continue(stepped) = feedback {
      exercise = stepped;
      surface.window.swap_buffers();
    } else {
      break 'app;
    }
  }

  log::info!("{} done", name);
  Ok(())
}

fn adapt_events(event: WindowEvent) -> Option<InputAction> {
  match event {
    WindowEvent::Close | WindowEvent::Key(Key::Escape, _, Action::Release, _) => {
      Some(InputAction::Quit)
    }

    WindowEvent::Key(Key::Enter, _, Action::Release, _) => Some(InputAction::MainToggle),

    WindowEvent::FramebufferSize(width, height) => Some(InputAction::Resized {
      width: width.max(0) as _,
      height: height.max(0) as _,
    }),

    _ => None,
  }
}

exercises! {
  "first-triangle", first_triangle,
  "ebo-rectangle", ebo_rectangle,
  "two-triangles", two_triangles,
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();
  let cli_opts = CLIOpts::from_args();

  if cli_opts.list_exercises {
    show_available_exercises();
    return;
  }

  if let Err(e) = pick_and_run_exercise(cli_opts) {
    log::error!("{}", e);

    if let DesktopError::NoExercise | DesktopError::UnknownExercise(_) = e {
      show_available_exercises();
    }

    process::exit(1);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use glfw::Modifiers;

  fn key(key: Key, action: Action) -> WindowEvent {
    WindowEvent::Key(key, 0, action, Modifiers::empty())
  }

  #[test]
  fn escape_release_quits() {
    assert_eq!(adapt_events(key(Key::Escape, Action::Release)), Some(InputAction::Quit));
    assert_eq!(adapt_events(key(Key::Escape, Action::Press)), None);
    assert_eq!(adapt_events(WindowEvent::Close), Some(InputAction::Quit));
  }

  #[test]
  fn enter_release_toggles() {
    assert_eq!(adapt_events(key(Key::Enter, Action::Release)), Some(InputAction::MainToggle));
    assert_eq!(adapt_events(key(Key::Enter, Action::Press)), None);
    assert_eq!(adapt_events(key(Key::Enter, Action::Repeat)), None);
  }

  #[test]
  fn modifiers_do_not_matter() {
    let shifted = WindowEvent::Key(Key::Enter, 0, Action::Release, Modifiers::Shift);
    assert_eq!(adapt_events(shifted), Some(InputAction::MainToggle));
  }

  #[test]
  fn other_keys_ignored() {
    assert_eq!(adapt_events(key(Key::Space, Action::Release)), None);
    assert_eq!(adapt_events(key(Key::A, Action::Press)), None);
  }

  #[test]
  fn framebuffer_resize() {
    assert_eq!(
      adapt_events(WindowEvent::FramebufferSize(1024, 768)),
      Some(InputAction::Resized {
        width: 1024,
        height: 768
      })
    );
  }

  #[test]
  fn cli_defaults() {
    let opts = CLIOpts::from_iter_safe(&["glstart-desktop", "ebo-rectangle"]).unwrap();

    assert!(!opts.list_exercises);
    assert_eq!((opts.width, opts.height), (800, 600));
    assert_eq!(opts.exercise.as_deref(), Some("ebo-rectangle"));
  }

  #[test]
  fn cli_list_and_size() {
    let opts =
      CLIOpts::from_iter_safe(&["glstart-desktop", "-l", "--width", "1024", "--height", "768"])
        .unwrap();

    assert!(opts.list_exercises);
    assert_eq!((opts.width, opts.height), (1024, 768));
    assert_eq!(opts.exercise, None);
  }

  #[test]
  fn cli_rejects_bad_size() {
    assert!(CLIOpts::from_iter_safe(&["glstart-desktop", "--width", "wide"]).is_err());
  }

  #[test]
  fn surface_errors_are_reported() {
    // GLFW init and window failures must come back as errors to exit with status 1
    assert!(glstart_glfw::LOG_ERRORS);
  }

  #[test]
  fn exercise_names() {
    assert_eq!(
      EXERCISE_NAMES,
      &["first-triangle", "ebo-rectangle", "two-triangles"]
    );
  }

  #[test]
  fn unknown_exercise_fails_before_opening_a_window() {
    let opts = CLIOpts::from_iter_safe(&["glstart-desktop", "hello-world"]).unwrap();

    match pick_and_run_exercise(opts) {
      Err(DesktopError::UnknownExercise(name)) => assert_eq!(name, "hello-world"),
      r => panic!("unexpected result: {:?}", r),
    }
  }

  #[test]
  fn missing_exercise() {
    let opts = CLIOpts::from_iter_safe(&["glstart-desktop"]).unwrap();
    assert!(matches!(pick_and_run_exercise(opts), Err(DesktopError::NoExercise)));
  }
}
