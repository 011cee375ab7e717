use crate::cli::{OutputFormat, PrefSetting, PrefsAction};
use crate::preferences::{Preferences, PreferencesStore};

pub fn run(action: &PrefsAction) -> Result<(), i32> {
    let Some(store) = PreferencesStore::from_env() else {
        eprintln!("Error: no configuration directory available");
        return Err(1);
    };

    match action {
        PrefsAction::Show { format } => {
            print_prefs(&store.load(), *format);
            Ok(())
        }
        PrefsAction::Toggle { setting } => {
            let mut prefs = store.load();
            toggle(&mut prefs, *setting);
            save(&store, &prefs)?;
            print_prefs(&prefs, OutputFormat::Text);
            Ok(())
        }
        PrefsAction::Reset => {
            let prefs = Preferences::default();
            save(&store, &prefs)?;
            print_prefs(&prefs, OutputFormat::Text);
            Ok(())
        }
    }
}

pub fn toggle(prefs: &mut Preferences, setting: PrefSetting) {
    match setting {
        PrefSetting::HighContrast => prefs.high_contrast = !prefs.high_contrast,
        PrefSetting::LargeText => prefs.large_text = !prefs.large_text,
    }
}

fn save(store: &PreferencesStore, prefs: &Preferences) -> Result<(), i32> {
    store.save(prefs).map_err(|e| {
        eprintln!("Error: cannot save {}: {e}", store.path().display());
        1
    })
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn print_prefs(prefs: &Preferences, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            println!("high-contrast: {}", on_off(prefs.high_contrast));
            println!("large-text: {}", on_off(prefs.large_text));
        }
        OutputFormat::Json => match serde_json::to_string(prefs) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: {e}"),
        },
    }
}
