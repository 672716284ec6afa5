use snippetvault_core::models::KNOWN_LANGUAGES;

pub fn run_languages() {
    for language in KNOWN_LANGUAGES {
        println!("{:<12} {}", language.slug, language.label);
    }
}
