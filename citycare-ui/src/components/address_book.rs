use super::FieldError;
use citycare_app::application::validation;
use citycare_app::domain::{Address, AddressField};
use leptos::prelude::*;

/// Saved addresses of a citizen, edited in place. Saving sends every entry;
/// entries without an id are created by the backend.
#[component]
pub fn AddressBook(
    addresses: RwSignal<Vec<Address>>,
    #[prop(into)] on_save: Callback<Vec<Address>>,
    #[prop(into)] busy: Signal<bool>,
) -> impl IntoView {
    let invalid = RwSignal::new(None::<String>);
    // Rebuild the inputs only when entries come or go, not on every keystroke.
    let count = Memo::new(move |_| addresses.with(Vec::len));

    let save = move |_: leptos::ev::MouseEvent| {
        match validation::validate_addresses(&addresses.get_untracked()) {
            Ok(cleaned) => {
                invalid.set(None);
                on_save.run(cleaned);
            }
            Err(e) => invalid.set(Some(e.to_string())),
        }
    };

    view! {
        <section class="form address-book">
            <h3 class="form__title">"My addresses"</h3>
            {move || {
                if count.get() == 0 {
                    return view! {
                        <p class="page-empty">"You haven't added any addresses yet."</p>
                    }
                    .into_any();
                }
                (0..count.get())
                    .map(|index| view! {
                        <fieldset class="form__group">
                            {AddressField::ALL
                                .into_iter()
                                .map(|field| view! {
                                    <label class="field">
                                        <span class="field__label">{field.label()}</span>
                                        <input
                                            class="field__input"
                                            prop:value=move || {
                                                addresses.with(|list| {
                                                    list.get(index)
                                                        .map(|address| address.field(field).to_string())
                                                        .unwrap_or_default()
                                                })
                                            }
                                            on:input=move |ev| {
                                                let value = event_target_value(&ev);
                                                addresses.update(|list| {
                                                    if let Some(address) = list.get_mut(index) {
                                                        address.set_field(field, value);
                                                    }
                                                });
                                            }
                                        />
                                    </label>
                                })
                                .collect::<Vec<_>>()}
                        </fieldset>
                    })
                    .collect::<Vec<_>>()
                    .into_any()
            }}
            <FieldError message=invalid/>
            <div class="address-book__actions">
                <button
                    type="button"
                    class="button"
                    on:click=move |_| addresses.update(|list| list.push(Address::default()))
                >
                    "Add address"
                </button>
                <button type="button" class="button button--primary" prop:disabled=move || busy.get() on:click=save>
                    "Save addresses"
                </button>
            </div>
        </section>
    }
}
