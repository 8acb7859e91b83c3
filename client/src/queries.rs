//! GraphQL documents sent by the client

macro_rules! page_info {
    () => {
        "pageInfo { startCursor endCursor hasNextPage hasPreviousPage } totalCount"
    };
}

macro_rules! vehicle_fields {
    () => {
        "id title description year price mileage fuelType transmission bodyType color condition status \
         vendorId brandId modelId brandName modelName vendorName createdAt updatedAt"
    };
}

macro_rules! vendor_fields {
    () => {
        "id name email phone address city status isVerified isEmailVerified organizationId roleId createdAt updatedAt"
    };
}

macro_rules! message_fields {
    () => {
        "id sender { kind id } recipient { kind id } content isSent isSeen createdAt"
    };
}

pub(crate) const HEALTH: &str = "query { health }";

pub(crate) const VERSION: &str = "query { version }";

pub(crate) const VEHICLE: &str = concat!("query Vehicle($id: Int!) { vehicle(id: $id) { ", vehicle_fields!(), " } }");

pub(crate) const VEHICLES: &str = concat!(
    "query Vehicles($first: Int, $after: String, $last: Int, $before: String) { ",
    "vehicles(first: $first, after: $after, last: $last, before: $before) { ",
    "edges { cursor node { ",
    vehicle_fields!(),
    " } } ",
    page_info!(),
    " } }"
);

pub(crate) const VEHICLES_FILTERED: &str = concat!(
    "query VehiclesFiltered($brandId: Int, $modelId: Int, $vendorId: Int, $status: VehicleStatus, ",
    "$minYear: Int, $maxYear: Int, $minPrice: Float, $maxPrice: Float, $maxMileage: Int, ",
    "$fuelType: String, $transmission: String, $bodyType: String, $search: String, ",
    "$first: Int, $after: String, $last: Int, $before: String) { ",
    "vehiclesFiltered(brandId: $brandId, modelId: $modelId, vendorId: $vendorId, status: $status, ",
    "minYear: $minYear, maxYear: $maxYear, minPrice: $minPrice, maxPrice: $maxPrice, maxMileage: $maxMileage, ",
    "fuelType: $fuelType, transmission: $transmission, bodyType: $bodyType, search: $search, ",
    "first: $first, after: $after, last: $last, before: $before) { ",
    "edges { cursor node { ",
    vehicle_fields!(),
    " } } ",
    page_info!(),
    " } }"
);

pub(crate) const VENDORS_BY_STATUS: &str = concat!(
    "query VendorsByStatus($status: AccountStatus!, $first: Int, $after: String, $last: Int, $before: String) { ",
    "vendorsByStatus(status: $status, first: $first, after: $after, last: $last, before: $before) { ",
    "edges { cursor node { ",
    vendor_fields!(),
    " } } ",
    page_info!(),
    " } }"
);

pub(crate) const MESSAGES: &str = concat!(
    "query Messages($participant: ParticipantInput!, $counterpart: ParticipantInput!, ",
    "$first: Int, $after: String, $last: Int, $before: String) { ",
    "messages(participant: $participant, counterpart: $counterpart, ",
    "first: $first, after: $after, last: $last, before: $before) { ",
    "edges { cursor node { ",
    message_fields!(),
    " } } ",
    page_info!(),
    " } }"
);

pub(crate) const CONVERSATIONS: &str = concat!(
    "query Conversations($participant: ParticipantInput!) { ",
    "conversations(participant: $participant) { counterpart { kind id } lastMessage { ",
    message_fields!(),
    " } unreadCount } }"
);

pub(crate) const UNREAD_MESSAGE_COUNT: &str =
    "query UnreadMessageCount($participant: ParticipantInput!) { unreadMessageCount(participant: $participant) }";

pub(crate) const SEND_MESSAGE: &str = concat!(
    "mutation SendMessage($input: SendMessageInput!) { sendMessage(input: $input) { ",
    message_fields!(),
    " } }"
);

pub(crate) const MARK_MESSAGES_SEEN: &str = "mutation MarkMessagesSeen($reader: ParticipantInput!, \
     $counterpart: ParticipantInput!, $upTo: Int) { markMessagesSeen(reader: $reader, counterpart: $counterpart, \
     upTo: $upTo) }";
