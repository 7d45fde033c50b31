//! The fixed table of API path names.
//!
//! Each entry produces a [`Path`] variant plus two accessors on [`SeniorVu`]
//! (starting a chain) and two on [`Chain`] (continuing it). The plain
//! accessor appends the segment; the `_with` form also applies one argument,
//! so `communities_with(1)` is `communities().arg(1)`. Names outside the
//! table can still be reached with [`Chain::arg`].

use crate::chain::{Chain, ChainArg};
use crate::client::SeniorVu;

macro_rules! api_paths {
    ($($method:ident, $method_with:ident => $variant:ident = $segment:literal,)*) => {
        /// A known API path name.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Path {
            $(
                #[doc = concat!("`", $segment, "`")]
                $variant,
            )*
        }

        impl Path {
            /// Every known path, in table order.
            pub const ALL: &'static [Path] = &[$(Path::$variant,)*];

            /// The URL segment for this path.
            pub fn segment(&self) -> &'static str {
                match self {
                    $(Path::$variant => $segment,)*
                }
            }

            /// Look up a path by its URL segment.
            pub fn from_segment(segment: &str) -> Option<Path> {
                match segment {
                    $($segment => Some(Path::$variant),)*
                    _ => None,
                }
            }
        }

        impl SeniorVu {
            $(
                #[doc = concat!("Start a chain at `/api/", $segment, "`.")]
                pub fn $method(&self) -> Chain<'_> {
                    self.chain().path(Path::$variant)
                }

                #[doc = concat!("Start a chain at `/api/", $segment, "` and apply `arg`.")]
                pub fn $method_with(&self, arg: impl Into<ChainArg>) -> Chain<'_> {
                    self.chain().path(Path::$variant).arg(arg)
                }
            )*
        }

        impl<'c> Chain<'c> {
            $(
                #[doc = concat!("Append `", $segment, "`.")]
                pub fn $method(self) -> Self {
                    self.path(Path::$variant)
                }

                #[doc = concat!("Append `", $segment, "` and apply `arg`.")]
                pub fn $method_with(self, arg: impl Into<ChainArg>) -> Self {
                    self.path(Path::$variant).arg(arg)
                }
            )*
        }
    };
}

api_paths! {
    claim_requests, claim_requests_with => ClaimRequests = "claimRequests",
    communities, communities_with => Communities = "communities",
    address, address_with => Address = "address",
    amenities, amenities_with => Amenities = "amenities",
    appointments, appointments_with => Appointments = "appointments",
    archived_leads, archived_leads_with => ArchivedLeads = "archivedLeads",
    assets, assets_with => Assets = "assets",
    image, image_with => Image = "image",
    video, video_with => Video = "video",
    aws_settings, aws_settings_with => AwsSettings = "awsSettings",
    cart_items, cart_items_with => CartItems = "cartItems",
    hours, hours_with => Hours = "hours",
    leads, leads_with => Leads = "leads",
    neighborhoods, neighborhoods_with => Neighborhoods = "neighborhoods",
    payment, payment_with => Payment = "payment",
    purchased_leads, purchased_leads_with => PurchasedLeads = "purchasedLeads",
    carers, carers_with => Carers = "carers",
    events, events_with => Events = "events",
    reviews, reviews_with => Reviews = "reviews",
    rooms, rooms_with => Rooms = "rooms",
    upload, upload_with => Upload = "upload",
    predict, predict_with => Predict = "predict",
    proximity, proximity_with => Proximity = "proximity",
    batch_create, batch_create_with => BatchCreate = "batchCreate",
    delete_created, delete_created_with => DeleteCreated = "deleteCreated",
    users, users_with => Users = "users",
    password, password_with => Password = "password",
    forgot_password, forgot_password_with => ForgotPassword = "forgotPassword",
    me, me_with => Me = "me",
    reset, reset_with => Reset = "reset",
    webhook, webhook_with => Webhook = "webhook",
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.segment())
    }
}
