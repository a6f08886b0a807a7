#[cfg(feature = "tokenizers")]
#[doc(inline)]
pub use lexsparse_tokenizers as tokenizers;

#[cfg(feature = "bm25")]
#[doc(inline)]
pub use lexsparse_bm25 as bm25;

#[cfg(feature = "pretrained")]
#[doc(inline)]
pub use lexsparse_pretrained as pretrained;
