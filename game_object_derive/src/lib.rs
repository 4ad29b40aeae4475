use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, punctuated::Punctuated, Data, DeriveInput, Fields, Path, Token,
};

/// 剛体を持つゲームオブジェクトに `HasBody` を実装し、能力トレイトの合成を検査するマクロ
///
/// 構造体は `id: EntityId`、`world: SharedWorld`、`body: BodyHandle` の
/// 3つのフィールドを持つ必要があります。
///
/// `#[capabilities(...)]` には合成する能力を列挙します。単一の識別子は
/// `matter_sprite::components::descriptors` の定数（`SetBody` → `SET_BODY`）に、
/// パスはそのまま記述子定数として解決されます。
/// 操作名が重複している場合はコンパイル時の定数評価で失敗します。
///
/// # 使用例
/// ```rust,ignore
/// #[derive(GameObject)]
/// #[capabilities(Bounce, Friction, Velocity)]
/// pub struct Crate {
///     id: EntityId,
///     world: SharedWorld,
///     body: BodyHandle,
/// }
/// ```
#[proc_macro_derive(GameObject, attributes(capabilities))]
pub fn derive_game_object(input: TokenStream) -> TokenStream {
    // 入力を解析
    let input = parse_macro_input!(input as DeriveInput);

    match expand_game_object(&input) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_game_object(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "GameObject cannot be derived for generic types",
        ));
    }

    check_required_fields(input)?;

    // 能力リストを収集
    let mut capabilities: Vec<Path> = Vec::new();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("capabilities")) {
        let paths = attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;
        capabilities.extend(paths);
    }

    let descriptors: Vec<TokenStream2> = capabilities.iter().map(descriptor_path).collect();

    let expanded = quote! {
        impl ::matter_sprite::components::HasBody for #name {
            fn game_object_id(&self) -> ::matter_sprite::ecs::EntityId {
                self.id
            }

            fn world(&self) -> &::matter_sprite::physics::SharedWorld {
                &self.world
            }

            fn body_handle(&self) -> ::matter_sprite::physics::BodyHandle {
                self.body
            }

            fn replace_body_handle(
                &mut self,
                handle: ::matter_sprite::physics::BodyHandle,
            ) -> ::matter_sprite::physics::BodyHandle {
                ::std::mem::replace(&mut self.body, handle)
            }
        }

        impl #name {
            /// この型に合成された能力の記述子
            pub const CAPABILITY_DESCRIPTORS: &'static [::matter_sprite::components::CapabilityDescriptor] =
                &[#(#descriptors),*];

            /// 操作名の重複がないことを検査済みの能力セット
            pub const CAPABILITIES: ::matter_sprite::components::CapabilitySet =
                ::matter_sprite::components::CapabilitySet::compose_const(Self::CAPABILITY_DESCRIPTORS);
        }

        // 定数評価を強制して、重複があればビルドを失敗させる
        const _: ::matter_sprite::components::CapabilitySet = #name::CAPABILITIES;
    };

    Ok(expanded)
}

/// `id`、`world`、`body` フィールドの存在を確認
fn check_required_fields(input: &DeriveInput) -> syn::Result<()> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "GameObject can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "GameObject can only be derived for structs",
            ))
        }
    };

    for required in ["id", "world", "body"] {
        let found = fields
            .iter()
            .any(|f| f.ident.as_ref().map(|i| i == required).unwrap_or(false));
        if !found {
            return Err(syn::Error::new_spanned(
                &input.ident,
                format!("GameObject requires a `{}` field", required),
            ));
        }
    }

    Ok(())
}

/// 能力名から記述子定数へのパスを生成
fn descriptor_path(path: &Path) -> TokenStream2 {
    if path.segments.len() == 1 && path.leading_colon.is_none() {
        let ident = &path.segments[0].ident;
        let constant = format_ident!("{}", to_upper_snake(&ident.to_string()));
        quote! { ::matter_sprite::components::descriptors::#constant }
    } else {
        quote! { #path }
    }
}

/// `SetBody` → `SET_BODY`
fn to_upper_snake(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.extend(ch.to_uppercase());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_upper_snake() {
        assert_eq!(to_upper_snake("Bounce"), "BOUNCE");
        assert_eq!(to_upper_snake("SetBody"), "SET_BODY");
        assert_eq!(to_upper_snake("Static"), "STATIC");
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct NoBody {
                id: u64,
                world: u32,
            }
        };
        let err = expand_game_object(&input).unwrap_err();
        assert!(err.to_string().contains("`body`"));
    }
}
