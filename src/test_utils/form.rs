use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(element: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let hx_attribute = element
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        hx_attribute, endpoint,
        "want element with attribute {attribute}=\"{endpoint}\", got {hx_attribute:?}"
    );
}

#[track_caller]
pub(crate) fn assert_form_input_with_value(
    form: &ElementRef<'_>,
    name: &str,
    type_: &str,
    value: &str,
) {
    for input in form.select(&Selector::parse("input").unwrap()) {
        let input_name = input.value().attr("name").unwrap_or_default();

        if input_name == name {
            let input_type = input.value().attr("type").unwrap_or_default();
            let input_value = input.value().attr("value").unwrap_or_default();

            assert_eq!(
                input_type, type_,
                "want input with type \"{type_}\", got {input_type:?}"
            );
            assert_eq!(
                input_value, value,
                "want input {name} with value \"{value}\", got {input_value:?}"
            );

            return;
        }
    }

    panic!("No input found with name \"{name}\" and type \"{type_}\"");
}

/// Assert that the select named `name` has `value` selected, or no selection
/// if `value` is `None`.
#[track_caller]
pub(crate) fn assert_selected_option(form: &ElementRef<'_>, name: &str, value: Option<&str>) {
    let select = form
        .select(&Selector::parse(&format!("select[name={name}]")).unwrap())
        .next()
        .unwrap_or_else(|| panic!("No select found with name \"{name}\""));

    let selected = select
        .select(&Selector::parse("option[selected]").unwrap())
        .map(|option| option.value().attr("value").unwrap_or_default())
        .collect::<Vec<_>>();

    match value {
        Some(value) => assert_eq!(
            selected,
            vec![value],
            "want option {value:?} selected in {name}, got {selected:?}"
        ),
        None => assert!(
            selected.iter().all(|selected| selected.is_empty()),
            "want no option selected in {name}, got {selected:?}"
        ),
    }
}

/// Assert the text of every button in `form`, in document order.
#[track_caller]
pub(crate) fn assert_form_buttons(form: &ElementRef<'_>, want_buttons: &[&str]) {
    let got_buttons = form
        .select(&Selector::parse("button").unwrap())
        .map(|button| button.text().collect::<String>().trim().to_owned())
        .collect::<Vec<_>>();

    assert_eq!(got_buttons, want_buttons);
}
